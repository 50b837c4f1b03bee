use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "FSC";
const CONFIG_FILE: &str = "roots.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "fsc", APP_NAME).map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the root list from `path`, or from the default location when `None`.
///
/// A missing, unreadable or malformed file (including valid JSON that is not
/// an array of strings) is not an error: the default roots are returned.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let config_path = match path.map(Path::to_path_buf).or_else(get_config_file_path) {
        Some(p) => p,
        None => {
            tracing::warn!("Could not determine config directory, using default roots");
            return AppConfig::default();
        }
    };

    if !config_path.exists() {
        tracing::info!(
            "Config file not found at {:?}, using default roots",
            config_path
        );
        return AppConfig::default();
    }

    let config_content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                "Failed to read config file at {:?}: {}. Using default roots.",
                config_path,
                e
            );
            return AppConfig::default();
        }
    };

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!(
                "Loaded {} root(s) from {:?}",
                config.roots.len(),
                config_path
            );
            config
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Using default roots.",
                config_path,
                e
            );
            AppConfig::default()
        }
    }
}

/// Saves the root list to `path`, or to the default location when `None`.
pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    // Create config directory if it doesn't exist.
    if let Some(config_dir) = config_path.parent() {
        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::info!("Saved {} root(s) to {:?}", config.roots.len(), config_path);

    Ok(())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.fsc.FSC/roots.json
// Linux:   ~/.config/fsc/roots.json
// Windows: %APPDATA%/fsc/FSC/config/roots.json
