//! 編集同期モジュール
//!
//! ローカル変更の送出（translator）とリモート操作の反映（applier）

pub mod applier;
pub mod translator;

// 公開API
pub use applier::RemoteOperationApplier;
pub use translator::{EditKind, LocalChangeTranslator, TranslatorStats};
