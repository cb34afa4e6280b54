//! User configuration loading for stepstone.
//!
//! User config location: $XDG_CONFIG_HOME/stepstone/stepstone.toml
//! Fallback: the platform config directory from `dirs::config_dir()`.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::NavigatorSettings;

const APP_DIR: &str = "stepstone";
const CONFIG_FILE: &str = "stepstone.toml";

/// Errors raised while reading a settings file
#[derive(Debug, Error)]
pub enum UserConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type UserConfigResult<T> = Result<T, UserConfigError>;

/// Returns the path to the user configuration file.
///
/// 1. `$XDG_CONFIG_HOME/stepstone/stepstone.toml` when the variable is set
/// 2. otherwise `<config_dir>/stepstone/stepstone.toml`
///
/// Returns None if neither location can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg_config).join(APP_DIR).join(CONFIG_FILE));
    }

    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the user configuration, if one exists.
///
/// A missing file is not an error; a file that exists but cannot be read or
/// parsed is.
pub fn load_user_config() -> UserConfigResult<Option<NavigatorSettings>> {
    match user_config_path() {
        Some(path) if path.exists() => load_settings_file(&path).map(Some),
        Some(path) => {
            log::debug!(
                target: "stepstone::config",
                "No user config at {}",
                path.display()
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Read and parse one settings file
pub fn load_settings_file(path: &Path) -> UserConfigResult<NavigatorSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| UserConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let settings = toml::from_str(&content).map_err(|source| UserConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        target: "stepstone::config",
        "Loaded settings from {}",
        path.display()
    );
    Ok(settings)
}
