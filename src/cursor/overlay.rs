//! カーソル表示マーカー
//!
//! リモートカーソルを描画するUI層とのインターフェース

use super::SiteId;
use crate::text::Position;

/// リモートカーソルのマーカーを描画するUI層
pub trait CursorOverlay {
    /// マーカーを作成して表示
    fn attach(&mut self, site_id: &SiteId, position: Position);

    /// マーカーを取り外す
    fn detach(&mut self, site_id: &SiteId);

    /// マーカーを移動
    fn move_to(&mut self, site_id: &SiteId, position: Position);
}

/// 何も描画しないマーカー
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOverlay;

impl CursorOverlay for NullOverlay {
    fn attach(&mut self, _site_id: &SiteId, _position: Position) {}

    fn detach(&mut self, _site_id: &SiteId) {}

    fn move_to(&mut self, _site_id: &SiteId, _position: Position) {}
}

/// マーカー操作の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    Attach { site_id: SiteId, position: Position },
    Detach { site_id: SiteId },
    MoveTo { site_id: SiteId, position: Position },
}

/// マーカー操作を記録するだけの実装（テスト・リプレイ用）
#[derive(Debug, Clone, Default)]
pub struct RecordingOverlay {
    events: Vec<OverlayEvent>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[OverlayEvent] {
        &self.events
    }

    /// 記録を取り出して空にする
    pub fn take_events(&mut self) -> Vec<OverlayEvent> {
        std::mem::take(&mut self.events)
    }
}

impl CursorOverlay for RecordingOverlay {
    fn attach(&mut self, site_id: &SiteId, position: Position) {
        self.events.push(OverlayEvent::Attach {
            site_id: site_id.clone(),
            position,
        });
    }

    fn detach(&mut self, site_id: &SiteId) {
        self.events.push(OverlayEvent::Detach {
            site_id: site_id.clone(),
        });
    }

    fn move_to(&mut self, site_id: &SiteId, position: Position) {
        self.events.push(OverlayEvent::MoveTo {
            site_id: site_id.clone(),
            position,
        });
    }
}
