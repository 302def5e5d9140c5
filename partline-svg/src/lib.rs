//! Partline SVG - line drawings of LDraw parts
//!
//! Projects a resolved edge list, fits it into a padded canvas and emits SVG.

use partline_core::Edge;

pub mod error;
pub mod options;
pub mod renderer;

pub use error::{ConfigError, ConfigResult};
pub use options::{load_config, RenderConfig, RenderOptions};
pub use renderer::{FitTransform, SvgRenderer, PLACEHOLDER_BACKGROUND, PLACEHOLDER_CAPTION};

/// Render `edges` with `options` (or the defaults).
///
/// `None` and an empty slice both produce the placeholder drawing.
pub fn render(edges: Option<&[Edge]>, options: Option<&RenderOptions>) -> String {
    let options = options.cloned().unwrap_or_default();
    SvgRenderer::new(options).render(edges.unwrap_or_default())
}
