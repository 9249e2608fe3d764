//! ローカル変更の変換
//!
//! ウィジェットの変更イベントを分類し、正規化した挿入・削除操作としてストアへ送る。
//! 同時にリモートカーソルをローカル編集に合わせて動かす。

use crate::cursor::{CursorOverlay, RemoteCursorRegistry};
use crate::error::{CollabError, Result};
use crate::store::{Operation, ReplicatedStore};
use crate::text::{compute_delta, Direction, Range};
use crate::widget::{ChangeOrigin, UserGesture, WidgetChange};

/// 変更イベントの処理方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// エンジン自身の書き込み
    Ignored,
    Insert,
    Delete,
}

/// 変換の統計情報
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslatorStats {
    /// 変換したイベント数
    pub translated: usize,
    /// 無視したイベント数
    pub ignored: usize,
    /// 送出した操作数
    pub emitted: usize,
}

/// ローカル変更の変換器
#[derive(Debug, Clone, Default)]
pub struct LocalChangeTranslator {
    stats: TranslatorStats,
}

impl LocalChangeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> TranslatorStats {
        self.stats
    }

    /// 発生元が扱えるものか確認する
    ///
    /// ウィジェットへ書き込む前に未対応の操作を弾くために使う。
    pub fn check_origin(&self, origin: &ChangeOrigin) -> Result<()> {
        match origin {
            ChangeOrigin::Unknown(tag) => Err(unknown_operation(tag)),
            _ => Ok(()),
        }
    }

    /// 発生元から処理方法を決める
    pub fn classify(&self, change: &WidgetChange) -> Result<EditKind> {
        match &change.origin {
            ChangeOrigin::Engine(_) => Ok(EditKind::Ignored),
            ChangeOrigin::User(UserGesture::Undo | UserGesture::Redo) => {
                if !change.removed_nothing() && change.inserted_nothing() {
                    Ok(EditKind::Delete)
                } else {
                    Ok(EditKind::Insert)
                }
            }
            ChangeOrigin::User(UserGesture::Compose | UserGesture::Input | UserGesture::Paste) => {
                Ok(EditKind::Insert)
            }
            ChangeOrigin::User(UserGesture::Delete | UserGesture::Cut) => Ok(EditKind::Delete),
            ChangeOrigin::Unknown(tag) => Err(unknown_operation(tag)),
        }
    }

    /// 変更イベントを変換し、送出した操作を返す
    ///
    /// 分類に失敗した場合はカーソルにもストアにも触れない。
    pub fn translate<S, O>(
        &mut self,
        change: &WidgetChange,
        registry: &mut RemoteCursorRegistry<O>,
        store: &mut S,
    ) -> Result<Vec<Operation>>
    where
        S: ReplicatedStore,
        O: CursorOverlay,
    {
        let kind = match self.classify(change) {
            Ok(kind) => kind,
            Err(err) => {
                log::error!("rejected widget change: {}", err);
                return Err(err);
            }
        };

        let operations: Vec<Operation> = match kind {
            EditKind::Ignored => {
                self.stats.ignored += 1;
                return Ok(Vec::new());
            }
            EditKind::Delete => process_delete(change, registry, store)
                .into_iter()
                .collect(),
            EditKind::Insert => process_insert(change, registry, store),
        };

        self.stats.translated += 1;
        self.stats.emitted += operations.len();
        Ok(operations)
    }
}

fn unknown_operation(tag: &str) -> CollabError {
    CollabError::UnknownOperation {
        origin: tag.to_string(),
    }
}

/// 挿入：選択範囲の置き換えに備えて先に削除を処理する
fn process_insert<S, O>(
    change: &WidgetChange,
    registry: &mut RemoteCursorRegistry<O>,
    store: &mut S,
) -> Vec<Operation>
where
    S: ReplicatedStore,
    O: CursorOverlay,
{
    let mut operations = Vec::with_capacity(2);
    let deleted = process_delete(change, registry, store);
    let replaced = deleted.is_some();
    operations.extend(deleted);

    let text = change.inserted_text();
    if text.is_empty() {
        return operations;
    }

    // 削除済みなら挿入位置は from に縮んでいる
    let at = if replaced { change.from } else { change.to };
    registry.shift_all(
        Range::collapsed(at),
        compute_delta(&text),
        Direction::Apply,
        None,
    );
    store.local_insert(&text, change.from);
    log::debug!("local insert {:?} at {}", text, change.from);

    operations.push(Operation::Insert {
        text,
        range: change.range(),
    });
    operations
}

fn process_delete<S, O>(
    change: &WidgetChange,
    registry: &mut RemoteCursorRegistry<O>,
    store: &mut S,
) -> Option<Operation>
where
    S: ReplicatedStore,
    O: CursorOverlay,
{
    if change.removed_nothing() {
        return None;
    }

    let removed = change.removed_text();
    let range = change.range();
    registry.shift_all(range, compute_delta(&removed), Direction::Revert, None);
    store.local_delete(change.from, change.to);
    log::debug!("local delete {}", range);

    Some(Operation::Delete { range })
}
