//! Render options and the TOML file they can be loaded from

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 400;
pub const DEFAULT_PADDING: u32 = 20;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.5;
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Canvas and stroke settings for one renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Margin kept clear on every side, capped at half the canvas.
    pub padding: u32,
    pub stroke_width: f64,
    /// CSS color for edges.
    pub stroke_color: String,
    /// CSS color behind the drawing.
    pub background_color: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            padding: DEFAULT_PADDING,
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub const fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, width: f64, color: &str) -> Self {
        self.stroke_width = width;
        self.stroke_color = color.to_string();
        self
    }

    /// Padding actually applied to the x and y axes.
    ///
    /// Never more than half the canvas, so the drawing area cannot go
    /// negative and flip the drawing.
    pub fn margins(&self) -> (f64, f64) {
        (
            f64::from(self.padding.min(self.width / 2)),
            f64::from(self.padding.min(self.height / 2)),
        )
    }

    /// Canvas size left after padding, as `(width, height)`.
    pub fn available(&self) -> (f64, f64) {
        let (margin_x, margin_y) = self.margins();
        (
            2.0f64.mul_add(-margin_x, f64::from(self.width)),
            2.0f64.mul_add(-margin_y, f64::from(self.height)),
        )
    }
}

/// Partial options as read from a config file or the command line.
///
/// Every field is optional and falls back to its own default.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub padding: Option<u32>,
    pub stroke_width: Option<f64>,
    pub stroke_color: Option<String>,
    pub background_color: Option<String>,
}

impl RenderConfig {
    /// Fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            padding: other.padding.or(self.padding),
            stroke_width: other.stroke_width.or(self.stroke_width),
            stroke_color: other.stroke_color.or(self.stroke_color),
            background_color: other.background_color.or(self.background_color),
        }
    }

    pub fn into_options(self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            padding: self.padding.unwrap_or(defaults.padding),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            stroke_color: self.stroke_color.unwrap_or(defaults.stroke_color),
            background_color: self.background_color.unwrap_or(defaults.background_color),
        }
    }
}

/// Load a render config; a missing file means all defaults.
pub fn load_config(path: &Path) -> ConfigResult<RenderConfig> {
    if !path.exists() {
        return Ok(RenderConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
