// Application settings
// Loaded from ~/.config/amtest/settings.toml; every field has a default so a
// missing or partial file is fine.

use std::path::PathBuf;

use amtest_chart::ChartOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Override for the shared (user-visible) output directory.
    pub output_dir: Option<PathBuf>,
    /// Standing consent to write user-visible storage without `--allow-shared`.
    pub allow_shared_storage: bool,
    /// Default template schema file.
    pub schema_path: Option<PathBuf>,
    /// Chart raster dimensions.
    pub chart: ChartOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: None,
            allow_shared_storage: false,
            schema_path: None,
            chart: ChartOptions::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("amtest").join("settings.toml"))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// malformed. A malformed file is reported but never fatal.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(text) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring malformed settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
