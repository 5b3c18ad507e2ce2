use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::geometry::Color;
use crate::history::DEFAULT_HISTORY_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "easel";
const CANVAS_CONFIG_FILE: &str = "canvas.json";

const DEFAULT_WIDTH: u32 = 550;
const DEFAULT_HEIGHT: u32 = 412;
const DEFAULT_HANDLE_SIZE: u32 = 7;
const DEFAULT_MARGIN: u32 = 20;

/// Construction-time settings for a canvas controller, from `canvas.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub history_capacity: usize,
    pub initial_width: u32,
    pub initial_height: u32,
    pub primary: Color,
    pub secondary: Color,
    /// Edge length of the resize handles drawn outside the surface.
    pub handle_size: u32,
    /// Space reserved right of and below the surface for shadows and handles.
    pub margin: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            initial_width: DEFAULT_WIDTH,
            initial_height: DEFAULT_HEIGHT,
            primary: Color::BLACK,
            secondary: Color::WHITE,
            handle_size: DEFAULT_HANDLE_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl CanvasConfig {
    /// Clamps values the canvas cannot work with.
    pub fn sanitized(mut self) -> Self {
        self.history_capacity = self.history_capacity.max(1);
        self.initial_width = self.initial_width.max(1);
        self.initial_height = self.initial_height.max(1);
        self.handle_size = self.handle_size.max(1);
        self
    }
}

pub fn load_canvas_config() -> CanvasConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_canvas_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_canvas_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> CanvasConfig {
    match app_config_path(APP_DIR, CANVAS_CONFIG_FILE, xdg_config_home, home) {
        Ok(path) => load_canvas_config_from(&path),
        Err(_) => CanvasConfig::default(),
    }
}

pub fn load_canvas_config_from(path: &Path) -> CanvasConfig {
    if !path.exists() {
        return CanvasConfig::default();
    }
    let config = match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse canvas.json; using defaults");
            CanvasConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read canvas.json; using defaults");
            CanvasConfig::default()
        }
    };
    config.sanitized()
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
