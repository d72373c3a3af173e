//! CLI command implementations

pub mod cards;
pub mod drill;
pub mod names;
pub mod render;
pub mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use earcard_core::{DirStore, SettingsStore};

/// Directory name under the platform config dir.
const APP_DIR: &str = "earcard";

/// Resolves the settings directory: `--config-dir` if given, else the
/// platform config directory.
pub fn config_dir(explicit: Option<&str>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .context("No config directory on this platform; pass --config-dir"),
    }
}

/// Opens the settings store in the resolved config directory.
pub fn settings_store(explicit: Option<&str>) -> Result<SettingsStore<DirStore>> {
    let dir = config_dir(explicit)?;
    tracing::debug!("settings directory: {}", dir.display());
    Ok(SettingsStore::new(DirStore::new(dir)))
}

/// Builds the single-threaded runtime every async command runs on.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

#[cfg(test)]
mod tests {
    use super::*;
    use earcard_core::{EngineId, Settings};
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_dir_wins() {
        assert_eq!(
            config_dir(Some("/tmp/earcard-test")).unwrap(),
            PathBuf::from("/tmp/earcard-test")
        );
    }

    #[test]
    fn test_settings_store_round_trip() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").to_string_lossy().into_owned();

        let store = settings_store(Some(&dir)).unwrap();
        assert_eq!(store.load(), Settings::default());

        let settings = Settings {
            engine: EngineId::Synth,
            ..Settings::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(settings_store(Some(&dir)).unwrap().load(), settings);
    }
}
