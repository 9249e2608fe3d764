//! conclave - 共同編集のための編集変換・カーソル変換エンジン
//!
//! ウィジェットの変更イベントを複製文書ストア向けの操作に変換し、
//! リモート操作をウィジェットへ反映しながら全てのカーソルを追従させる

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// 座標層
pub mod text;

// 状態層
pub mod cursor;
pub mod store;
pub mod widget;

// 同期層
pub mod session;
pub mod sync;

// ツール
pub mod replay;

// 公開API
pub use cursor::{CursorOverlay, RemoteCursorRegistry, SiteId};
pub use error::{CollabError, Result};
pub use session::{CollabSession, ContentListener};
pub use store::{OpKind, Operation, RemoteOperation, ReplicatedStore};
pub use text::{Delta, Direction, Position, Range};
pub use widget::{ChangeOrigin, TextWidget, WidgetChange};
