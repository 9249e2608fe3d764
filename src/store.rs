//! 複製文書ストアとの境界
//!
//! ローカル編集を送り出すインターフェースと、リモートから届く操作の型を定義

use crate::cursor::SiteId;
use crate::text::{Position, Range};
use serde::{Deserialize, Serialize};

/// 位置指定された正規化済みの編集操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    Insert { text: String, range: Range },
    Delete { range: Range },
}

impl Operation {
    pub fn range(&self) -> Range {
        match self {
            Operation::Insert { range, .. } | Operation::Delete { range } => *range,
        }
    }
}

/// リモート操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpKind {
    Insert,
    Delete,
}

/// リモートの共同編集者から届いた1文字の操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOperation {
    pub kind: OpKind,
    /// 挿入・削除された文字（改行を含む）
    pub character: char,
    pub range: Range,
    pub site_id: SiteId,
}

impl RemoteOperation {
    /// 1文字挿入
    pub fn insert(character: char, at: Position, site_id: impl Into<SiteId>) -> Self {
        Self {
            kind: OpKind::Insert,
            character,
            range: Range::collapsed(at),
            site_id: site_id.into(),
        }
    }

    /// 1文字削除
    pub fn delete(character: char, range: Range, site_id: impl Into<SiteId>) -> Self {
        Self {
            kind: OpKind::Delete,
            character,
            range,
            site_id: site_id.into(),
        }
    }
}

/// 複製文書ストア
///
/// 並行編集の順序決定と永続化はストア側の責務。
pub trait ReplicatedStore {
    /// ローカルの挿入を通知
    fn local_insert(&mut self, text: &str, position: Position);

    /// ローカルの削除を通知
    fn local_delete(&mut self, from: Position, to: Position);
}

/// 通知された操作を記録するだけのストア
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    operations: Vec<Operation>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// 記録を取り出して空にする
    pub fn take_operations(&mut self) -> Vec<Operation> {
        std::mem::take(&mut self.operations)
    }
}

impl ReplicatedStore for RecordingStore {
    fn local_insert(&mut self, text: &str, position: Position) {
        self.operations.push(Operation::Insert {
            text: text.to_string(),
            range: Range::collapsed(position),
        });
    }

    fn local_delete(&mut self, from: Position, to: Position) {
        self.operations.push(Operation::Delete {
            range: Range::new(from, to),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_operation_wire_shape() {
        let json = r#"{
            "kind": "insert",
            "character": "\n",
            "range": {"from": {"line": 2, "ch": 4}, "to": {"line": 2, "ch": 4}},
            "siteId": "B"
        }"#;
        let op: RemoteOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op, RemoteOperation::insert('\n', Position::new(2, 4), "B"));
    }

    #[test]
    fn test_recording_store() {
        let mut store = RecordingStore::new();
        store.local_insert("ab", Position::new(0, 1));
        store.local_delete(Position::new(0, 0), Position::new(0, 2));

        let ops = store.take_operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1].range(), Range::new(Position::new(0, 0), Position::new(0, 2)));
        assert!(store.operations().is_empty());
    }
}
