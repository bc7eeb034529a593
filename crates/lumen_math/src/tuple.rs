//! Homogeneous points and vectors.

use glam::DVec4;

/// A homogeneous 4-component tuple. `w == 1` marks a point, `w == 0` a vector.
pub type Tuple = DVec4;

/// Create a point (`w = 1`).
#[inline]
pub const fn point(x: f64, y: f64, z: f64) -> Tuple {
    DVec4::new(x, y, z, 1.0)
}

/// Create a vector (`w = 0`).
#[inline]
pub const fn vector(x: f64, y: f64, z: f64) -> Tuple {
    DVec4::new(x, y, z, 0.0)
}

/// Ray tracing operations on [`Tuple`] that glam does not provide for 4D vectors.
///
/// Reflection uses glam's inherent `DVec4::reflect`, which expects a unit normal.
pub trait TupleExt {
    fn is_point(&self) -> bool;
    fn is_vector(&self) -> bool;

    /// Euclidean length of the tuple.
    fn magnitude(&self) -> f64;

    /// Unit-length copy of the tuple.
    ///
    /// A zero-magnitude vector normalizes to the zero vector rather than
    /// propagating NaN.
    fn normalized(&self) -> Tuple;

    /// Cross product of the xyz parts; always a vector.
    fn cross(&self, other: Tuple) -> Tuple;

    /// Same xyz with `w` cleared.
    fn to_vector(&self) -> Tuple;
}

impl TupleExt for Tuple {
    #[inline]
    fn is_point(&self) -> bool {
        self.w == 1.0
    }

    #[inline]
    fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    #[inline]
    fn magnitude(&self) -> f64 {
        self.length()
    }

    #[inline]
    fn normalized(&self) -> Tuple {
        self.normalize_or_zero()
    }

    #[inline]
    fn cross(&self, other: Tuple) -> Tuple {
        self.truncate().cross(other.truncate()).extend(0.0)
    }

    #[inline]
    fn to_vector(&self) -> Tuple {
        vector(self.x, self.y, self.z)
    }
}
