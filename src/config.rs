use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PaintResult;
use crate::surface::{LineCap, LineJoin};
use crate::tools::Tool;

/// Size of the raster surface, fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

/// The toolbar settings a session starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub tool: Tool,
    pub color: String,
    pub line_width: f32,
    pub opacity: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            tool: Tool::Freehand,
            color: "#000".to_string(),
            line_width: 1.0,
            opacity: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

/// Application configuration, read from a JSON file. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub canvas: CanvasConfig,
    pub style: StyleConfig,
}

impl PaintConfig {
    pub fn from_json(json: &str) -> PaintResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> PaintResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads `path` if given, falling back to the defaults when it cannot be read.
    pub fn load_or_default(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {path}");
                config
            }
            Err(e) => {
                log::warn!("Using default config, {path} could not be loaded: {e}");
                Self::default()
            }
        }
    }
}
