use crate::output::Output;
use bgm_sync_config::{ConfigError, PathManager, SyncSettings};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::{Path, PathBuf};

pub mod config;
pub mod sync;
pub mod sync_ui;

/// Load settings from the explicit config file, or the platform default
/// location, with environment variables taking precedence. A missing
/// credential is fatal before any network call and names every missing
/// input at once.
pub(crate) fn load_settings(config_file: Option<&Path>, output: &Output) -> Result<SyncSettings> {
    let resolved: Option<PathBuf> = match config_file {
        Some(path) => Some(path.to_path_buf()),
        None => PathManager::new().ok().map(|paths| paths.config_file()),
    };

    match SyncSettings::load(resolved.as_deref()) {
        Ok(settings) => Ok(settings),
        Err(err @ ConfigError::MissingFields(_)) => {
            output.error(format!(
                "Missing required configuration: {}",
                err.missing_fields().join(", ")
            ));
            output.error("Set the environment variables above (or add them to the config file) and retry");
            Err(eyre!("configuration incomplete"))
        }
        Err(err) => Err(eyre!("{}", err)),
    }
}
