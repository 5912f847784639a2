use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use fractnav_core::Formula;
use fractnav_render::ColorMapper;

use crate::error::AppError;
use crate::keys::KeyBindings;
use crate::sink::RasterFormat;

// ---------------------------------------------------------------------------
// Session preferences
// ---------------------------------------------------------------------------

/// Defaults for a run. Command-line flags override any of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_x1")]
    pub x1: f64,
    #[serde(default = "default_y1")]
    pub y1: f64,
    #[serde(default = "default_x2")]
    pub x2: f64,
    #[serde(default = "default_y2")]
    pub y2: f64,
    #[serde(default = "default_side")]
    pub width: i32,
    #[serde(default = "default_side")]
    pub height: i32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Navigator step for the iteration cap.
    #[serde(default = "default_iter_step")]
    pub iter_step: u32,
    #[serde(default = "default_iter_step")]
    pub iter_min: u32,
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
    /// Height/width of the plane window. `None` follows the raster aspect.
    #[serde(default)]
    pub window_ratio: Option<f64>,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default = "default_true")]
    pub write_to_disk: bool,
    /// Output root. Empty means the user's picture directory.
    #[serde(default)]
    pub output_dir: String,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default)]
    pub format: RasterFormat,
    #[serde(default)]
    pub coloring: ColorMapper,
    #[serde(default)]
    pub formula: Formula,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    /// File the terminal display refreshes with each navigation preview.
    #[serde(default)]
    pub preview_path: String,
}

fn default_x1() -> f64 {
    -2.2
}
fn default_y1() -> f64 {
    -1.7
}
fn default_x2() -> f64 {
    1.2
}
fn default_y2() -> f64 {
    1.7
}
fn default_side() -> i32 {
    900
}
fn default_max_iterations() -> u32 {
    600
}
fn default_threshold() -> f64 {
    2.0
}
fn default_iter_step() -> u32 {
    100
}
fn default_max_frames() -> u32 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_file_prefix() -> String {
    "mandelbrot".to_string()
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            x1: default_x1(),
            y1: default_y1(),
            x2: default_x2(),
            y2: default_y2(),
            width: default_side(),
            height: default_side(),
            max_iterations: default_max_iterations(),
            threshold: default_threshold(),
            iter_step: default_iter_step(),
            iter_min: default_iter_step(),
            max_frames: default_max_frames(),
            window_ratio: None,
            interactive: false,
            write_to_disk: true,
            output_dir: String::new(),
            file_prefix: default_file_prefix(),
            format: RasterFormat::default(),
            coloring: ColorMapper::default(),
            formula: Formula::default(),
            key_bindings: KeyBindings::default(),
            preview_path: String::new(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Write these preferences to `path` as pretty JSON, creating parents.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let config_err = |source| AppError::Config {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(config_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(config_err)?;
        info!("Saved preferences to {}", path.display());
        Ok(())
    }
}

/// `preferences.json` next to the executable.
pub fn default_config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
