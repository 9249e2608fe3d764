//! 共同編集セッション
//!
//! ウィジェット・ストア・リモートカーソルを束ね、
//! ローカル変更とリモート操作をそれぞれの経路へ振り分ける

use crate::cursor::{CursorOverlay, RemoteCursorRegistry, SiteId};
use crate::error::Result;
use crate::store::{Operation, RemoteOperation, ReplicatedStore};
use crate::sync::{LocalChangeTranslator, RemoteOperationApplier, TranslatorStats};
use crate::text::{Position, Range};
use crate::widget::{ChangeOrigin, TextWidget, WidgetChange};

/// 文書内容の変更通知を受け取るリスナー
pub trait ContentListener {
    fn on_content_change(&mut self, value: &str);
}

impl<F> ContentListener for F
where
    F: FnMut(&str),
{
    fn on_content_change(&mut self, value: &str) {
        self(value)
    }
}

/// 共同編集セッション
pub struct CollabSession<W, S, O>
where
    W: TextWidget,
    S: ReplicatedStore,
    O: CursorOverlay,
{
    widget: W,
    store: S,
    registry: RemoteCursorRegistry<O>,
    translator: LocalChangeTranslator,
    applier: RemoteOperationApplier,
    listeners: Vec<Box<dyn ContentListener>>,
}

impl<W, S, O> CollabSession<W, S, O>
where
    W: TextWidget,
    S: ReplicatedStore,
    O: CursorOverlay,
{
    /// 新しいセッションを作成
    pub fn new(widget: W, store: S, overlay: O) -> Self {
        Self {
            widget,
            store,
            registry: RemoteCursorRegistry::new(overlay),
            translator: LocalChangeTranslator::new(),
            applier: RemoteOperationApplier::new(),
            listeners: Vec::new(),
        }
    }

    /// リスナーを追加
    pub fn add_listener(&mut self, listener: Box<dyn ContentListener>) {
        self.listeners.push(listener);
    }

    /// ウィジェットの変更イベントを処理
    ///
    /// 受け付けたイベントはエンジン自身の書き込みも含めてリスナーへ通知する。
    /// 未対応の発生元は通知せずにエラーを返す。
    pub fn handle_change(&mut self, change: &WidgetChange) -> Result<Vec<Operation>> {
        let operations = self
            .translator
            .translate(change, &mut self.registry, &mut self.store)?;

        let value = self.widget.value();
        for listener in &mut self.listeners {
            listener.on_content_change(&value);
        }
        Ok(operations)
    }

    /// ユーザー操作をウィジェットへ書き込み、その変更イベントを処理する
    pub fn local_edit(
        &mut self,
        text: &str,
        range: Range,
        origin: ChangeOrigin,
    ) -> Result<Vec<Operation>> {
        if let Err(err) = self.translator.check_origin(&origin) {
            log::error!("rejected local edit: {}", err);
            return Err(err);
        }
        let change = self.widget.replace_range(text, range, origin)?;
        self.handle_change(&change)
    }

    /// リモート操作を適用
    pub fn apply_remote(&mut self, op: &RemoteOperation) -> Result<()> {
        let echo = self
            .applier
            .apply(op, &mut self.widget, &mut self.registry)?;

        // 書き込みで発火したイベントは発生元で弾かれる
        let emitted = self.handle_change(&echo)?;
        debug_assert!(emitted.is_empty());
        Ok(())
    }

    /// 共同編集者の離脱
    pub fn remove_collaborator(&mut self, site_id: &SiteId) -> bool {
        self.registry.remove(site_id).is_some()
    }

    /// 文書全体を置き換え、ローカルカーソルを戻す
    ///
    /// リモートカーソルは新しい文書の範囲内に収める。
    pub fn replace_text(&mut self, text: &str) -> Result<()> {
        let cursor = self.widget.cursor();
        let change = self.widget.set_value(text);
        self.widget.set_cursor(cursor);

        let widget = &self.widget;
        self.registry.clip_all(|position| widget.clip(position));
        self.handle_change(&change)?;
        Ok(())
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn registry(&self) -> &RemoteCursorRegistry<O> {
        &self.registry
    }

    /// ローカルカーソル
    pub fn local_cursor(&self) -> Position {
        self.widget.cursor()
    }

    /// リモートカーソル
    pub fn remote_cursor(&self, site_id: &SiteId) -> Option<Position> {
        self.registry.position(site_id)
    }

    pub fn translator_stats(&self) -> TranslatorStats {
        self.translator.stats()
    }

    /// 適用したリモート操作数
    pub fn applied_remote(&self) -> usize {
        self.applier.applied()
    }
}
