//! エラーハンドリングシステム
//!
//! 編集変換エンジン全体で使用される統一されたエラー型を定義
//! 未知の編集操作は致命的エラー、範囲外の操作は呼び出し側の前提条件違反として扱う

use crate::text::Position;
use thiserror::Error;

/// エンジン全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollabError {
    /// ウィジェットから未対応の変更イベントが届いた
    #[error("Unknown operation attempted in editor: {origin}")]
    UnknownOperation { origin: String },

    /// 文書の範囲外を指す位置
    #[error("Position {position} is out of bounds")]
    OutOfBounds { position: Position },

    /// from > to の範囲
    #[error("Invalid range: {from} is after {to}")]
    InvalidRange { from: Position, to: Position },

    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// リプレイスクリプトの解析エラー
    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Invalid configuration file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
    Fatal,
}

impl CollabError {
    /// エラーの重大度
    pub fn level(&self) -> ErrorLevel {
        match self {
            CollabError::UnknownOperation { .. } => ErrorLevel::Fatal,
            CollabError::OutOfBounds { .. } | CollabError::InvalidRange { .. } => ErrorLevel::Error,
            CollabError::Config(ConfigError::NotFound { .. }) => ErrorLevel::Warning,
            CollabError::Config(_) | CollabError::Script { .. } => ErrorLevel::Error,
        }
    }

    /// ユーザー向け表示メッセージ
    pub fn display_message(&self) -> String {
        match self {
            CollabError::UnknownOperation { origin } => {
                format!("未対応の編集操作です: {}", origin)
            }
            CollabError::OutOfBounds { position } => {
                format!("文書の範囲外の位置です: {}", position)
            }
            CollabError::InvalidRange { from, to } => {
                format!("無効な範囲です: {} - {}", from, to)
            }
            CollabError::Config(ConfigError::NotFound { path }) => {
                format!("設定ファイルが見つかりません: {}", path)
            }
            CollabError::Script { line, message } => {
                format!("スクリプト{}行目: {}", line, message)
            }
            _ => format!("エラーが発生しました: {}", self),
        }
    }

    /// 致命的エラーかどうか
    pub fn is_fatal(&self) -> bool {
        self.level() == ErrorLevel::Fatal
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, CollabError>;

// std::io::Error から ConfigError への変換
impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io {
            message: error.to_string(),
        }
    }
}
