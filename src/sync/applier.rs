//! リモート操作の適用
//!
//! ストアから届いた1文字の挿入・削除をウィジェットへ反映し、
//! ローカルカーソルと各リモートカーソルを再配置する

use crate::cursor::{CursorOverlay, RemoteCursorRegistry};
use crate::error::Result;
use crate::store::{OpKind, RemoteOperation};
use crate::text::{compute_delta, transform, Direction, Position, Range};
use crate::widget::{ChangeOrigin, EngineWrite, TextWidget, WidgetChange};

/// リモート操作の適用器
#[derive(Debug, Clone, Default)]
pub struct RemoteOperationApplier {
    applied: usize,
}

impl RemoteOperationApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 適用した操作数
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// 操作を適用し、ウィジェットが発火した変更イベントを返す
    ///
    /// 範囲外の操作はウィジェットへの書き込みで失敗し、カーソルは変更されない。
    pub fn apply<W, O>(
        &mut self,
        op: &RemoteOperation,
        widget: &mut W,
        registry: &mut RemoteCursorRegistry<O>,
    ) -> Result<WidgetChange>
    where
        W: TextWidget,
        O: CursorOverlay,
    {
        let echo = match op.kind {
            OpKind::Insert => apply_insert(op, widget, registry)?,
            OpKind::Delete => apply_delete(op, widget, registry)?,
        };
        self.applied += 1;
        Ok(echo)
    }
}

fn apply_insert<W, O>(
    op: &RemoteOperation,
    widget: &mut W,
    registry: &mut RemoteCursorRegistry<O>,
) -> Result<WidgetChange>
where
    W: TextWidget,
    O: CursorOverlay,
{
    let local = widget.cursor();
    let text = op.character.to_string();
    let delta = compute_delta(&text);

    let echo = widget.replace_range(&text, op.range, ChangeOrigin::Engine(EngineWrite::RemoteInsert))?;

    registry.shift_all(op.range, delta, Direction::Apply, Some(&op.site_id));
    registry.upsert(&op.site_id, delta.advance(op.range.to));
    widget.set_cursor(transform(local, op.range, delta, Direction::Apply));

    log::debug!("remote insert {:?} at {} from {}", op.character, op.range.to, op.site_id);
    Ok(echo)
}

fn apply_delete<W, O>(
    op: &RemoteOperation,
    widget: &mut W,
    registry: &mut RemoteCursorRegistry<O>,
) -> Result<WidgetChange>
where
    W: TextWidget,
    O: CursorOverlay,
{
    let local = widget.cursor();
    let text = op.character.to_string();
    let delta = compute_delta(&text);

    let echo = widget.replace_range("", op.range, ChangeOrigin::Engine(EngineWrite::RemoteDelete))?;
    if echo.removed_text() != text {
        log::warn!(
            "remote delete from {} expected {:?} but removed {:?} at {}",
            op.site_id,
            op.character,
            echo.removed_text(),
            op.range
        );
    }

    registry.shift_all(op.range, delta, Direction::Revert, Some(&op.site_id));
    registry.upsert(&op.site_id, step_back(op.range));
    widget.set_cursor(transform(local, op.range, delta, Direction::Revert));

    log::debug!("remote delete {} from {}", op.range, op.site_id);
    Ok(echo)
}

/// 1文字削除の後に削除者のカーソルが残る位置
///
/// 同じ行なら1列戻る。改行の削除では前の行の末尾（`range.from`）。
fn step_back(range: Range) -> Position {
    let to = range.to;
    if to.line == range.from.line && to.column > 0 {
        Position::new(to.line, to.column - 1)
    } else {
        range.from
    }
}
