//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL conversation event log; disabled when unset.
    pub conversation_log: Option<PathBuf>,
}
