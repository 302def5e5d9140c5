//! SVG line-drawing renderer
use std::fmt::Write;

use nalgebra::Point2;
use partline_core::{project_edges, Bounds, Edge, ProjectedEdge};
use tracing::debug;

use crate::options::RenderOptions;

/// Background of the "no preview" drawing.
pub const PLACEHOLDER_BACKGROUND: &str = "#f0f0f0";
pub const PLACEHOLDER_CAPTION: &str = "No preview available";

/// Uniform scale plus offsets that center a bounding box in the padded canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub min_x: f64,
    pub min_y: f64,
}

impl FitTransform {
    pub fn new(bounds: &Bounds, options: &RenderOptions) -> Self {
        let (available_width, available_height) = options.available();
        let (margin_x, margin_y) = options.margins();
        let width = bounds.width();
        let height = bounds.height();

        // A flat dimension leaves its axis unscaled.
        let scale_x = if width > 0.0 { available_width / width } else { 1.0 };
        let scale_y = if height > 0.0 { available_height / height } else { 1.0 };
        let scale = scale_x.min(scale_y);

        Self {
            scale,
            offset_x: margin_x + width.mul_add(-scale, available_width) / 2.0,
            offset_y: margin_y + height.mul_add(-scale, available_height) / 2.0,
            min_x: bounds.min_x,
            min_y: bounds.min_y,
        }
    }

    pub fn apply(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            (point.x - self.min_x).mul_add(self.scale, self.offset_x),
            (point.y - self.min_y).mul_add(self.scale, self.offset_y),
        )
    }
}

/// Turns resolved edges into an SVG document sized to its options.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    options: RenderOptions,
}

impl SvgRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Project, fit and emit `edges`; no edges gives the placeholder.
    pub fn render(&self, edges: &[Edge]) -> String {
        if edges.is_empty() {
            return self.placeholder();
        }

        let projected = project_edges(edges);
        let bounds = Bounds::from_edges(&projected).unwrap_or_default();
        let fit = FitTransform::new(&bounds, &self.options);
        debug!(edges = edges.len(), scale = fit.scale, "Rendering line drawing");

        let scaled: Vec<ProjectedEdge> = projected
            .iter()
            .map(|edge| edge.map(|point| fit.apply(point)))
            .collect();

        self.markup(&scaled)
    }

    fn open_svg(&self, svg: &mut String) {
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.options.width,
            h = self.options.height,
        );
    }

    fn markup(&self, edges: &[ProjectedEdge]) -> String {
        let stroke = escape_xml(&self.options.stroke_color);
        let mut svg = String::new();

        self.open_svg(&mut svg);
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.options.background_color)
        );
        svg.push_str("  <g>\n");
        for edge in edges {
            let _ = writeln!(
                svg,
                r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                edge.start.x,
                edge.start.y,
                edge.end.x,
                edge.end.y,
                stroke,
                self.options.stroke_width
            );
        }
        svg.push_str("  </g>\n</svg>");

        svg
    }

    /// Gray canvas with a centered caption.
    pub fn placeholder(&self) -> String {
        let mut svg = String::new();
        self.open_svg(&mut svg);
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{PLACEHOLDER_BACKGROUND}"/>"#
        );
        svg.push_str(
            r##"  <text x="50%" y="50%" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="#666">"##,
        );
        let _ = write!(svg, "\n    {PLACEHOLDER_CAPTION}\n  </text>\n</svg>");
        svg
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
