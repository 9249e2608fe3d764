//! リモートカーソル管理モジュール
//!
//! 共同編集者ごとのカーソル位置と、その表示マーカーを管理

pub mod overlay;
pub mod registry;

// 公開API
pub use overlay::{CursorOverlay, NullOverlay, OverlayEvent, RecordingOverlay};
pub use registry::{RemoteCursorRecord, RemoteCursorRegistry};

use serde::{Deserialize, Serialize};
use std::fmt;

/// 共同編集者（サイト）の一意識別子
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SiteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
