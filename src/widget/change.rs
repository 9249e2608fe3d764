//! ウィジェット変更イベント
//!
//! ウィジェットが報告する変更と、その発生元の分類

use crate::text::{Position, Range};
use serde::{Deserialize, Serialize};

/// エンジン自身による書き込み
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineWrite {
    /// リモート挿入の反映（`insertText`）
    RemoteInsert,
    /// リモート削除の反映（`deleteText`）
    RemoteDelete,
    /// 全文の置き換え（`setValue`）
    Reset,
}

/// ユーザー操作による変更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserGesture {
    Undo,
    Redo,
    /// IME入力（`*compose`）
    Compose,
    /// キー入力（`+input`）
    Input,
    Paste,
    /// 削除キー（`+delete`）
    Delete,
    Cut,
}

/// 変更の発生元
///
/// ウィジェットの文字列タグは読み込み時に一度だけ解釈する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeOrigin {
    Engine(EngineWrite),
    User(UserGesture),
    /// 未対応のタグ
    Unknown(String),
}

impl ChangeOrigin {
    /// ウィジェットのタグから解釈
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "insertText" => ChangeOrigin::Engine(EngineWrite::RemoteInsert),
            "deleteText" => ChangeOrigin::Engine(EngineWrite::RemoteDelete),
            "setValue" => ChangeOrigin::Engine(EngineWrite::Reset),
            "undo" => ChangeOrigin::User(UserGesture::Undo),
            "redo" => ChangeOrigin::User(UserGesture::Redo),
            "*compose" => ChangeOrigin::User(UserGesture::Compose),
            "+input" => ChangeOrigin::User(UserGesture::Input),
            "paste" => ChangeOrigin::User(UserGesture::Paste),
            "+delete" => ChangeOrigin::User(UserGesture::Delete),
            "cut" => ChangeOrigin::User(UserGesture::Cut),
            other => ChangeOrigin::Unknown(other.to_string()),
        }
    }

    /// ウィジェットのタグ表現
    pub fn tag(&self) -> &str {
        match self {
            ChangeOrigin::Engine(EngineWrite::RemoteInsert) => "insertText",
            ChangeOrigin::Engine(EngineWrite::RemoteDelete) => "deleteText",
            ChangeOrigin::Engine(EngineWrite::Reset) => "setValue",
            ChangeOrigin::User(UserGesture::Undo) => "undo",
            ChangeOrigin::User(UserGesture::Redo) => "redo",
            ChangeOrigin::User(UserGesture::Compose) => "*compose",
            ChangeOrigin::User(UserGesture::Input) => "+input",
            ChangeOrigin::User(UserGesture::Paste) => "paste",
            ChangeOrigin::User(UserGesture::Delete) => "+delete",
            ChangeOrigin::User(UserGesture::Cut) => "cut",
            ChangeOrigin::Unknown(tag) => tag,
        }
    }

    /// エンジン自身の書き込みか
    pub fn is_engine(&self) -> bool {
        matches!(self, ChangeOrigin::Engine(_))
    }
}

impl From<String> for ChangeOrigin {
    fn from(tag: String) -> Self {
        ChangeOrigin::from_tag(&tag)
    }
}

impl From<ChangeOrigin> for String {
    fn from(origin: ChangeOrigin) -> Self {
        origin.tag().to_string()
    }
}

/// ウィジェットの変更イベント
///
/// `from` / `to` は変更前の座標。`text` は挿入された内容、`removed` は削除された内容を
/// それぞれ行ごとに分割したもの。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetChange {
    pub origin: ChangeOrigin,
    pub from: Position,
    pub to: Position,
    #[serde(default = "empty_lines")]
    pub text: Vec<String>,
    #[serde(default = "empty_lines")]
    pub removed: Vec<String>,
}

fn empty_lines() -> Vec<String> {
    vec![String::new()]
}

impl WidgetChange {
    /// 変更範囲
    pub fn range(&self) -> Range {
        Range::new(self.from, self.to)
    }

    /// 挿入された文字列
    pub fn inserted_text(&self) -> String {
        join_lines(&self.text)
    }

    /// 削除された文字列
    pub fn removed_text(&self) -> String {
        join_lines(&self.removed)
    }

    /// 何も挿入されていないか
    pub fn inserted_nothing(&self) -> bool {
        is_blank(&self.text)
    }

    /// 何も削除されていないか
    pub fn removed_nothing(&self) -> bool {
        is_blank(&self.removed)
    }
}

/// 行の列を文字列に戻す
///
/// 空行2つへの分割は改行1文字を表す。
pub fn join_lines(lines: &[String]) -> String {
    match lines {
        [first, second] if first.is_empty() && second.is_empty() => "\n".to_string(),
        _ => lines.join("\n"),
    }
}

/// 「何もない」を表す形（空文字列1行、または行なし）か
pub fn is_blank(lines: &[String]) -> bool {
    match lines {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    }
}

/// 文字列をウィジェットの行表現に分割
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_origin_tags_round_trip() {
        for tag in [
            "insertText", "deleteText", "setValue", "undo", "redo", "*compose", "+input",
            "paste", "+delete", "cut",
        ] {
            assert_eq!(ChangeOrigin::from_tag(tag).tag(), tag);
        }
        assert_eq!(
            ChangeOrigin::from_tag("drag"),
            ChangeOrigin::Unknown("drag".to_string())
        );
    }

    #[test]
    fn test_engine_origins() {
        assert!(ChangeOrigin::from_tag("insertText").is_engine());
        assert!(ChangeOrigin::from_tag("setValue").is_engine());
        assert!(!ChangeOrigin::from_tag("+input").is_engine());
        assert!(!ChangeOrigin::from_tag("foo").is_engine());
    }

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines(&lines(&["", ""])), "\n");
        assert_eq!(join_lines(&lines(&["ab", "cd"])), "ab\ncd");
        assert_eq!(join_lines(&lines(&["abc"])), "abc");
        assert_eq!(join_lines(&lines(&["a", "", ""])), "a\n\n");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&lines(&[""])));
        assert!(is_blank(&[]));
        assert!(!is_blank(&lines(&["", ""])));
        assert!(!is_blank(&lines(&["x"])));
    }

    #[test]
    fn test_change_deserializes_from_widget_shape() {
        let json = r#"{
            "origin": "+input",
            "from": {"line": 0, "ch": 3},
            "to": {"line": 0, "ch": 3},
            "text": ["x"],
            "removed": [""]
        }"#;
        let change: WidgetChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.origin, ChangeOrigin::User(UserGesture::Input));
        assert_eq!(change.inserted_text(), "x");
        assert!(change.removed_nothing());
    }
}
