//! Geometry primitives for LDraw line drawings
use nalgebra::Point3;

use crate::parser::LineDiagnostic;
use crate::transform::Placement;

/// A single 3D line segment with a decorative LDraw color code.
///
/// `color` is `None` when the source token was not a number. Endpoints may
/// coincide and may carry NaN coordinates from malformed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub color: Option<i32>,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Edge {
    pub fn new(color: Option<i32>, start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { color, start, end }
    }

    /// Build an edge from `[x1, y1, z1, x2, y2, z2]`.
    pub fn from_coords(color: Option<i32>, coords: [f64; 6]) -> Self {
        Self {
            color,
            start: Point3::new(coords[0], coords[1], coords[2]),
            end: Point3::new(coords[3], coords[4], coords[5]),
        }
    }
}

/// A type 1 line: inline another part at a position and orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubfileReference {
    pub color: Option<i32>,
    pub placement: Placement,
    /// Referenced filename exactly as written, spaces included.
    pub filename: String,
}

impl SubfileReference {
    pub fn new(color: Option<i32>, placement: Placement, filename: impl Into<String>) -> Self {
        Self {
            color,
            placement,
            filename: filename.into(),
        }
    }
}

/// Content of exactly one part file, sub-references left unexpanded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPart {
    pub name: String,
    pub edges: Vec<Edge>,
    pub references: Vec<SubfileReference>,
    /// Lines that were skipped or carried non-numeric tokens.
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ParsedPart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.references.is_empty()
    }
}
