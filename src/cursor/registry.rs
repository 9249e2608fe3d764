//! リモートカーソル登録簿
//!
//! 共同編集者ごとに最後のカーソル位置を1件ずつ保持する。
//! レコードの変更は `upsert` / `remove` / `shift_all` のみを経由する。

use super::overlay::CursorOverlay;
use super::SiteId;
use crate::text::{transform, Delta, Direction, Position, Range};
use serde::Serialize;
use std::collections::BTreeMap;

/// 1人の共同編集者のカーソル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCursorRecord {
    pub site_id: SiteId,
    /// 直近に適用された文字の直後の位置
    pub last_position: Position,
}

/// リモートカーソル登録簿
#[derive(Debug)]
pub struct RemoteCursorRegistry<O: CursorOverlay> {
    records: BTreeMap<SiteId, RemoteCursorRecord>,
    overlay: O,
}

impl<O: CursorOverlay> RemoteCursorRegistry<O> {
    /// 空の登録簿を作成
    pub fn new(overlay: O) -> Self {
        Self {
            records: BTreeMap::new(),
            overlay,
        }
    }

    /// カーソルを作成、または位置を上書き
    ///
    /// 初めて見るサイトならマーカーを作成する。
    pub fn upsert(&mut self, site_id: &SiteId, position: Position) {
        match self.records.get_mut(site_id) {
            Some(record) => {
                record.last_position = position;
                self.overlay.move_to(site_id, position);
            }
            None => {
                log::debug!("tracking new collaborator {} at {}", site_id, position);
                self.records.insert(
                    site_id.clone(),
                    RemoteCursorRecord {
                        site_id: site_id.clone(),
                        last_position: position,
                    },
                );
                self.overlay.attach(site_id, position);
            }
        }
    }

    /// カーソルを削除（存在しなければ何もしない）
    pub fn remove(&mut self, site_id: &SiteId) -> Option<RemoteCursorRecord> {
        let removed = self.records.remove(site_id)?;
        self.overlay.detach(site_id);
        log::debug!("collaborator {} left", site_id);
        Some(removed)
    }

    /// `except` 以外の全カーソルを編集に合わせて再配置
    pub fn shift_all(
        &mut self,
        edit: Range,
        delta: Delta,
        direction: Direction,
        except: Option<&SiteId>,
    ) {
        for (site_id, record) in self.records.iter_mut() {
            if except == Some(site_id) {
                continue;
            }

            let moved = transform(record.last_position, edit, delta, direction);
            if moved != record.last_position {
                record.last_position = moved;
                self.overlay.move_to(site_id, moved);
            }
        }
    }

    /// 全カーソルを `clip` で文書内に収める
    pub fn clip_all<F>(&mut self, clip: F)
    where
        F: Fn(Position) -> Position,
    {
        for (site_id, record) in self.records.iter_mut() {
            let clipped = clip(record.last_position);
            if clipped != record.last_position {
                log::debug!("collaborator {} clipped to {}", site_id, clipped);
                record.last_position = clipped;
                self.overlay.move_to(site_id, clipped);
            }
        }
    }

    /// 指定サイトのカーソル
    pub fn get(&self, site_id: &SiteId) -> Option<&RemoteCursorRecord> {
        self.records.get(site_id)
    }

    /// 指定サイトのカーソル位置
    pub fn position(&self, site_id: &SiteId) -> Option<Position> {
        self.records.get(site_id).map(|record| record.last_position)
    }

    /// サイト順にカーソルを列挙
    pub fn records(&self) -> impl Iterator<Item = &RemoteCursorRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }
}

impl<O: CursorOverlay + Default> Default for RemoteCursorRegistry<O> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::overlay::{OverlayEvent, RecordingOverlay};
    use crate::text::compute_delta;

    fn site(id: &str) -> SiteId {
        SiteId::from(id)
    }

    #[test]
    fn test_upsert_attaches_once() {
        let mut registry = RemoteCursorRegistry::new(RecordingOverlay::new());
        registry.upsert(&site("a"), Position::new(0, 1));
        registry.upsert(&site("a"), Position::new(0, 2));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.position(&site("a")), Some(Position::new(0, 2)));
        assert_eq!(
            registry.overlay().events(),
            &[
                OverlayEvent::Attach {
                    site_id: site("a"),
                    position: Position::new(0, 1)
                },
                OverlayEvent::MoveTo {
                    site_id: site("a"),
                    position: Position::new(0, 2)
                },
            ]
        );
    }

    #[test]
    fn test_remove_detaches() {
        let mut registry = RemoteCursorRegistry::new(RecordingOverlay::new());
        registry.upsert(&site("a"), Position::new(1, 1));

        assert!(registry.remove(&site("a")).is_some());
        assert!(registry.remove(&site("a")).is_none());
        assert!(registry.is_empty());
        assert_eq!(
            registry.overlay().events().last(),
            Some(&OverlayEvent::Detach { site_id: site("a") })
        );
    }

    #[test]
    fn test_shift_all_skips_excluded_site() {
        let mut registry = RemoteCursorRegistry::new(RecordingOverlay::new());
        registry.upsert(&site("a"), Position::new(0, 5));
        registry.upsert(&site("b"), Position::new(0, 5));

        registry.shift_all(
            Range::collapsed(Position::new(0, 1)),
            compute_delta("xy"),
            Direction::Apply,
            Some(&site("b")),
        );

        assert_eq!(registry.position(&site("a")), Some(Position::new(0, 7)));
        assert_eq!(registry.position(&site("b")), Some(Position::new(0, 5)));
    }

    #[test]
    fn test_shift_all_only_moves_changed_markers() {
        let mut registry = RemoteCursorRegistry::new(RecordingOverlay::new());
        registry.upsert(&site("a"), Position::new(0, 0));
        registry.upsert(&site("b"), Position::new(3, 0));
        registry.overlay_mut().take_events();

        registry.shift_all(
            Range::collapsed(Position::new(1, 0)),
            compute_delta("\n"),
            Direction::Apply,
            None,
        );

        assert_eq!(
            registry.overlay().events(),
            &[OverlayEvent::MoveTo {
                site_id: site("b"),
                position: Position::new(4, 0)
            }]
        );
    }

    #[test]
    fn test_clip_all_pulls_cursors_into_document() {
        let mut registry = RemoteCursorRegistry::new(RecordingOverlay::new());
        registry.upsert(&site("a"), Position::new(0, 1));
        registry.upsert(&site("b"), Position::new(5, 9));
        registry.overlay_mut().take_events();

        let end = Position::new(1, 3);
        registry.clip_all(|position| position.min(end));

        assert_eq!(registry.position(&site("a")), Some(Position::new(0, 1)));
        assert_eq!(registry.position(&site("b")), Some(end));
        assert_eq!(
            registry.overlay().events(),
            &[OverlayEvent::MoveTo {
                site_id: site("b"),
                position: end
            }]
        );
    }
}
