pub mod config;
pub mod paths;

pub use config::{BangumiSettings, ConfigError, NotionSettings, SyncOptions, SyncSettings};
pub use paths::PathManager;
