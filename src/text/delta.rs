//! 座標のずれ計算
//!
//! 文字列の挿入・削除が生む行・列のずれと、そのずれを任意の位置へ適用する変換

use super::position::{Position, Range};
use serde::{Deserialize, Serialize};

/// 文字列が生む行・列のずれ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delta {
    /// 改行の数
    pub line_delta: usize,
    /// 最後の改行以降の文字数（改行がなければ全体の文字数）
    pub column_delta: usize,
}

impl Delta {
    pub fn new(line_delta: usize, column_delta: usize) -> Self {
        Self {
            line_delta,
            column_delta,
        }
    }

    /// ずれを順に連結する（self の後ろに next が続く）
    pub fn combine(self, next: Delta) -> Delta {
        if next.line_delta > 0 {
            Delta::new(self.line_delta + next.line_delta, next.column_delta)
        } else {
            Delta::new(self.line_delta, self.column_delta + next.column_delta)
        }
    }

    /// `start` にこのずれを持つ文字列を挿入した直後の位置
    pub fn advance(self, start: Position) -> Position {
        if self.line_delta > 0 {
            Position::new(start.line + self.line_delta, self.column_delta)
        } else {
            Position::new(start.line, start.column + self.column_delta)
        }
    }
}

/// 変換の向き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 挿入：ずれを加算
    Apply,
    /// 削除：ずれを減算
    Revert,
}

/// 文字列を一度走査してずれを求める
pub fn compute_delta(sequence: &str) -> Delta {
    sequence.chars().fold(Delta::default(), |mut delta, ch| {
        if ch == '\n' {
            delta.line_delta += 1;
            delta.column_delta = 0;
        } else {
            delta.column_delta += 1;
        }
        delta
    })
}

/// 編集範囲 `edit` とずれ `delta` に従って `target` を再配置する
///
/// * `edit.to` より後ろの行にある位置は行だけがずれる
/// * `edit.to` と同じ行で列が後ろにある位置は列がずれ、複数行の編集なら行も移る
/// * `edit.to` ちょうど、またはそれより前の位置は動かない
///
/// 削除（`Revert`）では削除範囲の内側にある位置は `edit.from` に寄せる。
pub fn transform(target: Position, edit: Range, delta: Delta, direction: Direction) -> Position {
    if direction == Direction::Revert && edit.strictly_contains(target) {
        return edit.from;
    }

    let to = edit.to;
    let mut moved = target;

    if target.line > to.line {
        moved.line = shift(target.line, delta.line_delta, direction);
    } else if target.line == to.line && target.column > to.column {
        if delta.line_delta > 0 {
            moved.line = shift(target.line, delta.line_delta, direction);
            moved.column = match direction {
                Direction::Apply => target.column - to.column,
                Direction::Revert => target.column + edit.from.column,
            };
        }
        moved.column = shift(moved.column, delta.column_delta, direction);
    }

    moved
}

fn shift(value: usize, amount: usize, direction: Direction) -> usize {
    match direction {
        Direction::Apply => value + amount,
        Direction::Revert => value.saturating_sub(amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn test_compute_delta() {
        assert_eq!(compute_delta(""), Delta::new(0, 0));
        assert_eq!(compute_delta("abc"), Delta::new(0, 3));
        assert_eq!(compute_delta("\n"), Delta::new(1, 0));
        assert_eq!(compute_delta("ab\ncd\nxyz"), Delta::new(2, 3));
        assert_eq!(compute_delta("日本語"), Delta::new(0, 3));
    }

    #[test]
    fn test_combine_matches_concatenation() {
        let a = "hello\nwor";
        let b = "ld\n!";
        assert_eq!(
            compute_delta(a).combine(compute_delta(b)),
            compute_delta(&format!("{}{}", a, b))
        );
        assert_eq!(
            compute_delta("ab").combine(compute_delta("cd")),
            Delta::new(0, 4)
        );
    }

    #[test]
    fn test_advance() {
        assert_eq!(compute_delta("x").advance(pos(0, 0)), pos(0, 1));
        assert_eq!(compute_delta("\n").advance(pos(3, 7)), pos(4, 0));
        assert_eq!(compute_delta("ab\ncd").advance(pos(1, 4)), pos(2, 2));
    }

    #[test]
    fn test_insert_shifts_later_lines() {
        let edit = Range::collapsed(pos(1, 2));
        let moved = transform(pos(3, 5), edit, compute_delta("a\nb"), Direction::Apply);
        assert_eq!(moved, pos(4, 5));
    }

    #[test]
    fn test_insert_same_line_single_line_text() {
        let edit = Range::collapsed(pos(0, 2));
        let moved = transform(pos(0, 6), edit, compute_delta("xyz"), Direction::Apply);
        assert_eq!(moved, pos(0, 9));
    }

    #[test]
    fn test_insert_same_line_multi_line_text() {
        // "ab|cde" に "12\n34" を挿入すると "ab12" / "34cde" になる
        let edit = Range::collapsed(pos(1, 2));
        let moved = transform(pos(1, 5), edit, compute_delta("12\n34"), Direction::Apply);
        assert_eq!(moved, pos(2, 5));
    }

    #[test]
    fn test_tie_is_not_affected() {
        let edit = Range::collapsed(pos(2, 4));
        assert_eq!(
            transform(pos(2, 4), edit, compute_delta("\n"), Direction::Apply),
            pos(2, 4)
        );
        assert_eq!(
            transform(pos(2, 1), edit, compute_delta("\n"), Direction::Apply),
            pos(2, 1)
        );
    }

    #[test]
    fn test_delete_same_line() {
        let edit = Range::new(pos(0, 5), pos(0, 8));
        let moved = transform(pos(0, 10), edit, compute_delta("abc"), Direction::Revert);
        assert_eq!(moved, pos(0, 7));
    }

    #[test]
    fn test_delete_across_lines() {
        // 1行目の列2から2行目の列3までを削除
        let edit = Range::new(pos(1, 2), pos(2, 3));
        let removed = compute_delta("xyz\nabc");
        assert_eq!(transform(pos(2, 5), edit, removed, Direction::Revert), pos(1, 4));
        assert_eq!(transform(pos(4, 1), edit, removed, Direction::Revert), pos(3, 1));
    }

    #[test]
    fn test_delete_collapses_inner_positions() {
        let edit = Range::new(pos(0, 2), pos(0, 3));
        assert_eq!(
            transform(pos(0, 3), edit, compute_delta("c"), Direction::Revert),
            pos(0, 2)
        );
        let newline = Range::new(pos(0, 4), pos(1, 0));
        assert_eq!(
            transform(pos(1, 0), newline, compute_delta("\n"), Direction::Revert),
            pos(0, 4)
        );
    }

    #[test]
    fn test_removed_newline_joins_following_text() {
        let edit = Range::new(pos(0, 4), pos(1, 0));
        let moved = transform(pos(1, 3), edit, compute_delta("\n"), Direction::Revert);
        assert_eq!(moved, pos(0, 7));
    }
}
