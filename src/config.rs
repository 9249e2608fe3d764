//! 設定
//!
//! JSON形式の設定ファイルを読み込む。全ての項目に既定値がある。

use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ログレベルを上書きする環境変数
pub const LOG_ENV: &str = "CONCLAVE_LOG";

/// エンジン全体の設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    pub logging: LoggingConfig,
    pub replay: ReplayConfig,
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// 追記先のファイル（未指定なら出力しない）
    pub file: Option<PathBuf>,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
            stderr: true,
        }
    }
}

/// リプレイツールの設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReplayConfig {
    /// レポートをJSONで出力
    pub json_output: bool,
}

impl EngineConfig {
    /// 設定を読み込む
    ///
    /// 明示的なパスは存在しなければエラー。指定がなければ既定の場所を探し、
    /// 見つからなければ既定値を使う。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Ok(level) = std::env::var(LOG_ENV) {
            config.apply_log_override(&level)?;
        }
        Ok(config)
    }

    /// ファイルから読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_json(&raw).map_err(|err| match err {
            crate::error::CollabError::Config(ConfigError::InvalidFile { message, .. }) => {
                ConfigError::InvalidFile {
                    path: path.display().to_string(),
                    message,
                }
                .into()
            }
            other => other,
        })
    }

    /// JSON文字列から読み込む
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| {
            ConfigError::InvalidFile {
                path: "<inline>".to_string(),
                message: err.to_string(),
            }
            .into()
        })
    }

    /// ログレベルを文字列で上書き
    pub fn apply_log_override(&mut self, level: &str) -> Result<()> {
        self.logging.level = level.parse().map_err(|value| ConfigError::InvalidValue {
            key: LOG_ENV.to_string(),
            value,
        })?;
        Ok(())
    }
}

/// 既定の設定ファイルの場所（`<config_dir>/conclave/config.json`）
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("conclave").join("config.json"))
}
