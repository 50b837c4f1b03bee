pub mod settings;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The persisted application configuration: the ordered list of search roots.
///
/// On disk this is a bare JSON array of path strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AppConfig {
    pub roots: Vec<PathBuf>,
}

impl AppConfig {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Loads the configuration from the default location, falling back to defaults.
    pub fn load() -> Self {
        settings::load_config(None)
    }

    /// Replaces the root list, dropping blank and duplicate entries while keeping order.
    pub fn set_roots<I>(&mut self, roots: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut cleaned: Vec<PathBuf> = Vec::new();
        for root in roots {
            if root.as_os_str().is_empty() || cleaned.contains(&root) {
                continue;
            }
            cleaned.push(root);
        }
        self.roots = cleaned;
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
        }
    }
}

/// The root used when no configuration is available.
///
/// The system drive on Windows, the user's home directory elsewhere.
pub fn default_roots() -> Vec<PathBuf> {
    if cfg!(windows) {
        return vec![PathBuf::from("C:\\")];
    }
    dirs::home_dir().into_iter().collect()
}
