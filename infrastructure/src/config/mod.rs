//! Configuration file loading for llm-sandbox
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SANDBOX_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./sandbox.toml` or `./.sandbox.toml`
//! 4. Global: `$XDG_CONFIG_HOME/llm-sandbox/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileAnalyticsConfig, FileConfig,
    FileConversationConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
