//! テキスト座標モジュール
//!
//! 行・列による位置表現と、編集による座標のずれの計算を提供

pub mod delta;
pub mod position;

// 公開API
pub use delta::{compute_delta, transform, Delta, Direction};
pub use position::{Position, Range};
