//! CaptureConfig - 捕捉処理の設定
//!
//! TOML で読み込めます。キーはすべて省略可能です。
//!
//! ```toml
//! trace_limit = 65536
//! capture_backtrace = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on the stored stack dump, in bytes.
pub const DEFAULT_TRACE_LIMIT: usize = 1 << 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Stack dumps longer than this are cut (on a char boundary) and flagged
    /// as truncated.
    pub trace_limit: usize,

    /// When false only the `thread '..' panicked at ..` header is kept.
    pub capture_backtrace: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            trace_limit: DEFAULT_TRACE_LIMIT,
            capture_backtrace: true,
        }
    }
}

impl CaptureConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trace_limit == 0 {
            return Err(ConfigError::Invalid(
                "trace_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
