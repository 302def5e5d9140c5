//! Affine placement of sub-parts
use nalgebra::{Matrix3, Point3, Vector3};

use crate::geometry::Edge;

/// A 3x3 linear transform followed by a translation, as carried by a
/// type 1 line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub matrix: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Placement {
    pub fn new(matrix: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            matrix,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    /// Build from the on-disk field order: translation, then `a b c d e f g h i`
    /// row by row.
    pub fn from_row_major(translation: [f64; 3], rows: [f64; 9]) -> Self {
        Self::new(
            Matrix3::from_row_slice(&rows),
            Vector3::new(translation[0], translation[1], translation[2]),
        )
    }

    /// Pure translation with identity orientation
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(Matrix3::identity(), Vector3::new(dx, dy, dz))
    }

    /// Uniform scale about the origin
    pub fn uniform_scale(k: f64) -> Self {
        Self::new(Matrix3::from_diagonal_element(k), Vector3::zeros())
    }

    /// `matrix * p + translation`
    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.matrix * point.coords + self.translation)
    }

    /// Transform both endpoints; the color is carried through.
    pub fn apply_edge(&self, edge: &Edge) -> Edge {
        Edge::new(
            edge.color,
            self.apply_point(&edge.start),
            self.apply_point(&edge.end),
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}
