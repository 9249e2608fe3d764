//! セッションのリプレイ
//!
//! JSON Lines 形式のスクリプト（ローカル操作・リモート操作・離脱・全文置換）を
//! メモリ上のウィジェットに対して順に再生する

use crate::cursor::{NullOverlay, RemoteCursorRecord, SiteId};
use crate::error::{CollabError, Result};
use crate::session::CollabSession;
use crate::store::{Operation, RecordingStore, RemoteOperation};
use crate::text::{Position, Range};
use crate::widget::{ChangeOrigin, MemoryWidget, TextWidget};
use serde::{Deserialize, Serialize};
use std::fmt;

/// スクリプトの1ステップ
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptStep {
    /// ユーザー操作
    Local {
        origin: ChangeOrigin,
        from: Position,
        to: Position,
        #[serde(default)]
        text: String,
    },
    /// リモート操作
    Remote(RemoteOperation),
    /// 共同編集者の離脱
    Leave {
        #[serde(rename = "siteId")]
        site_id: SiteId,
    },
    /// 全文置換
    Reset { text: String },
}

/// 行番号付きのステップ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    /// 1ベースの行番号
    pub line: usize,
    pub step: ScriptStep,
}

/// スクリプトを解析（空行と `#` で始まる行は読み飛ばす）
pub fn parse_script(raw: &str) -> Result<Vec<ScriptEntry>> {
    let mut entries = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step = serde_json::from_str(trimmed).map_err(|err| CollabError::Script {
            line: index + 1,
            message: err.to_string(),
        })?;
        entries.push(ScriptEntry {
            line: index + 1,
            step,
        });
    }
    Ok(entries)
}

/// リプレイ用のセッション
pub type ReplaySession = CollabSession<MemoryWidget, RecordingStore, NullOverlay>;

/// スクリプト再生器
pub struct Replayer {
    session: ReplaySession,
}

impl Replayer {
    /// 初期文書から再生器を作成
    pub fn new(initial: &str) -> Self {
        Self {
            session: CollabSession::new(
                MemoryWidget::from_text(initial),
                RecordingStore::new(),
                NullOverlay,
            ),
        }
    }

    /// 1ステップ再生
    pub fn step(&mut self, step: &ScriptStep) -> Result<()> {
        match step {
            ScriptStep::Local {
                origin,
                from,
                to,
                text,
            } => {
                self.session
                    .local_edit(text, Range::new(*from, *to), origin.clone())?;
            }
            ScriptStep::Remote(op) => self.session.apply_remote(op)?,
            ScriptStep::Leave { site_id } => {
                if !self.session.remove_collaborator(site_id) {
                    log::warn!("leave for unknown collaborator {}", site_id);
                }
            }
            ScriptStep::Reset { text } => self.session.replace_text(text)?,
        }
        Ok(())
    }

    /// 全ステップを再生
    pub fn run(&mut self, entries: &[ScriptEntry]) -> Result<()> {
        for entry in entries {
            self.step(&entry.step)?;
        }
        Ok(())
    }

    pub fn session(&self) -> &ReplaySession {
        &self.session
    }

    /// 現在の状態をレポートにまとめる
    pub fn report(&self) -> ReplayReport {
        let stats = self.session.translator_stats();
        ReplayReport {
            content: self.session.widget().value(),
            local_cursor: self.session.local_cursor(),
            remote_cursors: self.session.registry().records().cloned().collect(),
            operations: self.session.store().operations().to_vec(),
            translated: stats.translated,
            ignored: stats.ignored,
            applied_remote: self.session.applied_remote(),
        }
    }
}

/// リプレイ結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub content: String,
    pub local_cursor: Position,
    pub remote_cursors: Vec<RemoteCursorRecord>,
    /// ストアへ送出した操作
    pub operations: Vec<Operation>,
    pub translated: usize,
    pub ignored: usize,
    pub applied_remote: usize,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- content ---")?;
        writeln!(f, "{}", self.content)?;
        writeln!(f, "--- cursors ---")?;
        writeln!(f, "local: {}", self.local_cursor)?;
        for record in &self.remote_cursors {
            writeln!(f, "{}: {}", record.site_id, record.last_position)?;
        }
        writeln!(f, "--- outbound ---")?;
        for op in &self.operations {
            match op {
                Operation::Insert { text, range } => writeln!(f, "insert {:?} at {}", text, range.from)?,
                Operation::Delete { range } => writeln!(f, "delete {}", range)?,
            }
        }
        write!(
            f,
            "translated {} / ignored {} / remote {}",
            self.translated, self.ignored, self.applied_remote
        )
    }
}
