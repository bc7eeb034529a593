//! 4x4 transform matrices.
//!
//! `glam::DMat4` is column-major; the helpers here let callers think in the
//! row-major terms transforms are usually written in.

use glam::{DMat4, DVec4};

use crate::MathError;

/// A 4x4 transformation matrix.
pub type Matrix = DMat4;

/// Extension trait for Matrix with row-major accessors and checked inversion.
pub trait MatrixExt: Sized {
    /// Build a matrix from rows.
    fn from_rows(rows: [[f64; 4]; 4]) -> Self;

    /// Element at `row`, `col`.
    fn at(&self, row: usize, col: usize) -> f64;

    /// Inverse via the adjugate (cofactor) expansion, refusing singular input.
    fn try_inverse(&self) -> Result<Self, MathError>;

    /// Whether the matrix has an inverse.
    fn is_invertible(&self) -> bool;
}

impl MatrixExt for Matrix {
    fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        DMat4::from_cols(
            DVec4::from_array(rows[0]),
            DVec4::from_array(rows[1]),
            DVec4::from_array(rows[2]),
            DVec4::from_array(rows[3]),
        )
        .transpose()
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.col(col)[row]
    }

    fn try_inverse(&self) -> Result<Self, MathError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(MathError::SingularMatrix(det));
        }
        Ok(self.inverse())
    }

    fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && det.is_finite()
    }
}
