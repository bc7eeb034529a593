//! Lumen math - the algebra every other part of the ray tracer is built on.
//!
//! Points and vectors are homogeneous 4-component tuples (`w = 1` for points,
//! `w = 0` for vectors) backed by `glam::DVec4`; transforms are `glam::DMat4`.
//! All floating point comparisons go through [`ApproxEq`] with the single
//! tolerance [`EPSILON`].

// Re-export the glam types the renderer is written against
pub use glam::{DMat4, DVec3, DVec4};

mod bounds;
mod matrix;
mod ray;
mod transform;
mod tuple;

pub use bounds::BoundingBox;
pub use matrix::{Matrix, MatrixExt};
pub use ray::Ray;
pub use transform::{
    rotation_x, rotation_y, rotation_z, scaling, shearing, translation, view_transform,
    TransformBuilder,
};
pub use tuple::{point, vector, Tuple, TupleExt};

use thiserror::Error;

/// Tolerance used by every approximate comparison in the renderer.
pub const EPSILON: f64 = 1e-5;

/// Errors raised by the algebra layer.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("matrix is not invertible (determinant {0})")]
    SingularMatrix(f64),
}

/// Approximate equality within [`EPSILON`].
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    #[inline]
    fn approx_eq(&self, other: &Self) -> bool {
        // Equal infinities compare equal, which unbounded boxes rely on.
        self == other || (self - other).abs() < EPSILON
    }
}

impl ApproxEq for DVec3 {
    fn approx_eq(&self, other: &Self) -> bool {
        self.x.approx_eq(&other.x) && self.y.approx_eq(&other.y) && self.z.approx_eq(&other.z)
    }
}

impl ApproxEq for DVec4 {
    fn approx_eq(&self, other: &Self) -> bool {
        self.x.approx_eq(&other.x)
            && self.y.approx_eq(&other.y)
            && self.z.approx_eq(&other.z)
            && self.w.approx_eq(&other.w)
    }
}

impl ApproxEq for DMat4 {
    fn approx_eq(&self, other: &Self) -> bool {
        (0..4).all(|c| self.col(c).approx_eq(&other.col(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_approx_eq() {
        assert!(1.0.approx_eq(&1.000_001));
        assert!(!1.0.approx_eq(&1.000_1));
        assert!(f64::INFINITY.approx_eq(&f64::INFINITY));
        assert!(!f64::INFINITY.approx_eq(&f64::NEG_INFINITY));
    }

    #[test]
    fn test_matrix_approx_eq() {
        let a = DMat4::IDENTITY;
        let mut b = DMat4::IDENTITY;
        b.x_axis.x += 0.000_001;
        assert!(a.approx_eq(&b));
        b.w_axis.y = 0.1;
        assert!(!a.approx_eq(&b));
    }
}
