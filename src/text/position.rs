//! 位置と範囲
//!
//! 文書内の行・列座標を表現する

use serde::{Deserialize, Serialize};
use std::fmt;

/// 文書内の位置
///
/// 列は行内の文字（Unicodeスカラー値）単位。ウィジェットとのやり取りでは
/// `{"line": n, "ch": n}` の形でシリアライズされる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行番号（0ベース）
    pub line: usize,
    /// 列番号（0ベース、文字単位）
    #[serde(rename = "ch", alias = "column")]
    pub column: usize,
}

impl Position {
    /// 指定された行・列の位置を作成
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// 文書の先頭
    pub fn origin() -> Self {
        Self::default()
    }

    /// 次の行の先頭
    pub fn next_line_start(self) -> Self {
        Self::new(self.line + 1, 0)
    }

    /// 同じ行で1列右
    pub fn next_column(self) -> Self {
        Self::new(self.line, self.column + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// 編集の影響範囲（from ≤ to）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub from: Position,
    pub to: Position,
}

impl Range {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// 幅ゼロの範囲（挿入位置）
    pub fn collapsed(at: Position) -> Self {
        Self { from: at, to: at }
    }

    /// from ≤ to を満たすか
    pub fn is_ordered(&self) -> bool {
        self.from <= self.to
    }

    /// 位置が範囲の内側（from より後ろ、to 以前）にあるか
    pub fn strictly_contains(&self, position: Position) -> bool {
        position > self.from && position <= self.to
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_is_document_order() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::new(1, 1), Position::new(1, 1));
    }

    #[test]
    fn test_position_wire_shape() {
        let json = serde_json::to_string(&Position::new(2, 4)).unwrap();
        assert_eq!(json, r#"{"line":2,"ch":4}"#);

        let parsed: Position = serde_json::from_str(r#"{"line":1,"column":7}"#).unwrap();
        assert_eq!(parsed, Position::new(1, 7));
    }

    #[test]
    fn test_range_contains() {
        let range = Range::new(Position::new(0, 2), Position::new(1, 1));
        assert!(!range.strictly_contains(Position::new(0, 2)));
        assert!(range.strictly_contains(Position::new(0, 5)));
        assert!(range.strictly_contains(Position::new(1, 1)));
        assert!(!range.strictly_contains(Position::new(1, 2)));
        assert!(range.is_ordered());
        assert!(!Range::new(Position::new(1, 0), Position::new(0, 0)).is_ordered());
    }
}
