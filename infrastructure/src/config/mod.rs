//! Configuration file loading for chatwire
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHATWIRE_*` environment variables (`CHATWIRE_ENDPOINT__URL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./chatwire.toml` or `./.chatwire.toml`
//! 4. Global config: `<config_dir>/chatwire/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileEndpointConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
