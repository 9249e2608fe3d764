//! メモリ上のテキストウィジェット
//!
//! 行の配列で文書を保持し、実際のウィジェットと同じ形の変更イベントを返す

use super::change::{split_lines, ChangeOrigin, WidgetChange};
use super::TextWidget;
use crate::error::{CollabError, Result};
use crate::text::{compute_delta, Position, Range};

/// 行単位で文書を保持するウィジェット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryWidget {
    /// 文書の各行（常に1行以上）
    lines: Vec<String>,
    /// ローカルカーソル
    cursor: Position,
}

impl MemoryWidget {
    /// 空のウィジェットを作成
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::origin(),
        }
    }

    /// 文字列からウィジェットを作成
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
            cursor: Position::origin(),
        }
    }

    /// 行数
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 指定行の内容
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// 文書末尾の位置
    pub fn end_position(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.lines[last].chars().count())
    }

    /// 位置が文書内を指しているか
    pub fn contains(&self, position: Position) -> bool {
        self.lines
            .get(position.line)
            .map(|line| position.column <= line.chars().count())
            .unwrap_or(false)
    }

    fn check_range(&self, range: Range) -> Result<()> {
        for position in [range.from, range.to] {
            if !self.contains(position) {
                return Err(CollabError::OutOfBounds { position });
            }
        }
        if !range.is_ordered() {
            return Err(CollabError::InvalidRange {
                from: range.from,
                to: range.to,
            });
        }
        Ok(())
    }

    /// 範囲内の内容を行ごとに取り出す
    fn slice_lines(&self, range: Range) -> Vec<String> {
        let Range { from, to } = range;
        if from.line == to.line {
            let line = &self.lines[from.line];
            let start = byte_index(line, from.column);
            let end = byte_index(line, to.column);
            return vec![line[start..end].to_string()];
        }

        let mut removed = Vec::with_capacity(to.line - from.line + 1);
        let first = &self.lines[from.line];
        removed.push(first[byte_index(first, from.column)..].to_string());
        removed.extend(self.lines[from.line + 1..to.line].iter().cloned());
        let last = &self.lines[to.line];
        removed.push(last[..byte_index(last, to.column)].to_string());
        removed
    }
}

impl Default for MemoryWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWidget for MemoryWidget {
    fn value(&self) -> String {
        self.lines.join("\n")
    }

    fn set_value(&mut self, text: &str) -> WidgetChange {
        let change = WidgetChange {
            origin: ChangeOrigin::Engine(super::EngineWrite::Reset),
            from: Position::origin(),
            to: self.end_position(),
            text: split_lines(text),
            removed: self.lines.clone(),
        };
        self.lines = split_lines(text);
        self.cursor = Position::origin();
        change
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn clip(&self, position: Position) -> Position {
        if position.line >= self.lines.len() {
            return self.end_position();
        }
        let line_len = self.lines[position.line].chars().count();
        Position::new(position.line, position.column.min(line_len))
    }

    fn set_cursor(&mut self, position: Position) {
        self.cursor = self.clip(position);
    }

    fn replace_range(
        &mut self,
        text: &str,
        range: Range,
        origin: ChangeOrigin,
    ) -> Result<WidgetChange> {
        self.check_range(range)?;

        let removed = self.slice_lines(range);
        let inserted = split_lines(text);

        let first = &self.lines[range.from.line];
        let prefix = first[..byte_index(first, range.from.column)].to_string();
        let last = &self.lines[range.to.line];
        let suffix = last[byte_index(last, range.to.column)..].to_string();

        let mut replacement = inserted.clone();
        let last_index = replacement.len() - 1;
        replacement[0].insert_str(0, &prefix);
        replacement[last_index].push_str(&suffix);
        self.lines
            .splice(range.from.line..=range.to.line, replacement);

        if matches!(origin, ChangeOrigin::User(_)) {
            self.cursor = compute_delta(text).advance(range.from);
        }
        self.cursor = self.clip(self.cursor);

        Ok(WidgetChange {
            origin,
            from: range.from,
            to: range.to,
            text: inserted,
            removed,
        })
    }
}

/// 文字位置をバイト位置に変換（行末を超える場合は行末）
fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}
