//! テキストウィジェットモジュール
//!
//! 文書を表示・編集するウィジェットとの境界を定義

pub mod change;
pub mod memory;

// 公開API
pub use change::{ChangeOrigin, EngineWrite, UserGesture, WidgetChange};
pub use memory::MemoryWidget;

use crate::error::Result;
use crate::text::{Position, Range};

/// テキストウィジェット
///
/// 書き込みは必ず発生元を伴い、ウィジェットはその書き込みで発火した変更イベントを返す。
pub trait TextWidget {
    /// 文書全体
    fn value(&self) -> String;

    /// 文書全体を置き換える（発生元は `setValue`）
    fn set_value(&mut self, text: &str) -> WidgetChange;

    /// ローカルカーソル
    fn cursor(&self) -> Position;

    /// ローカルカーソルを設定
    fn set_cursor(&mut self, position: Position);

    /// 位置を文書内に収める
    fn clip(&self, position: Position) -> Position;

    /// 範囲を置き換える
    fn replace_range(&mut self, text: &str, range: Range, origin: ChangeOrigin)
        -> Result<WidgetChange>;
}
