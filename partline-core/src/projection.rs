//! Fixed axonometric projection and 2D bounds
use nalgebra::{Point2, Point3};

use crate::geometry::Edge;

/// cos 30°, i.e. √3 / 2
pub const COS_30: f64 = 0.866_025_403_784_438_6;
/// sin 30°
pub const SIN_30: f64 = 0.5;

/// A projected (or scaled) edge. Color is not carried past projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEdge {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl ProjectedEdge {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    /// Map both endpoints through `f`.
    pub fn map(&self, f: impl Fn(&Point2<f64>) -> Point2<f64>) -> Self {
        Self::new(f(&self.start), f(&self.end))
    }
}

/// `x' = (x - z)·cos30`, `y' = y + (x + z)·sin30`
///
/// No camera, no perspective; the same point always lands in the same place.
pub fn project_point(point: &Point3<f64>) -> Point2<f64> {
    Point2::new(
        point.x * COS_30 - point.z * COS_30,
        point.y + point.x * SIN_30 + point.z * SIN_30,
    )
}

pub fn project_edge(edge: &Edge) -> ProjectedEdge {
    ProjectedEdge::new(project_point(&edge.start), project_point(&edge.end))
}

pub fn project_edges(edges: &[Edge]) -> Vec<ProjectedEdge> {
    edges.iter().map(project_edge).collect()
}

/// Axis-aligned bounding box of a set of 2D edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds over every finite coordinate, or `None` if an axis has none.
    ///
    /// NaN and infinite coordinates are ignored here; they still reach the
    /// edge itself.
    pub fn from_edges(edges: &[ProjectedEdge]) -> Option<Self> {
        let mut bounds = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };

        for edge in edges {
            bounds.include(&edge.start);
            bounds.include(&edge.end);
        }

        (bounds.min_x.is_finite()
            && bounds.min_y.is_finite()
            && bounds.max_x.is_finite()
            && bounds.max_y.is_finite())
        .then_some(bounds)
    }

    fn include(&mut self, point: &Point2<f64>) {
        if point.x.is_finite() {
            self.min_x = self.min_x.min(point.x);
            self.max_x = self.max_x.max(point.x);
        }
        if point.y.is_finite() {
            self.min_y = self.min_y.min(point.y);
            self.max_y = self.max_y.max(point.y);
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
