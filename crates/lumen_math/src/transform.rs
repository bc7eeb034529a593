// Affine transform builders.
//
// Thin wrappers over glam's constructors so scene code reads in terms of
// points and vectors. Shearing and the view transform have no glam
// equivalent with the conventions used here, so they are built by rows.

use glam::DVec3;

use crate::{Matrix, MatrixExt, Tuple, TupleExt};

/// Translation by (x, y, z). Vectors are unaffected.
pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
    Matrix::from_translation(DVec3::new(x, y, z))
}

/// Non-uniform scale. Negative factors reflect.
pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
    Matrix::from_scale(DVec3::new(x, y, z))
}

/// Rotation around the x axis by `radians` (right handed).
pub fn rotation_x(radians: f64) -> Matrix {
    Matrix::from_rotation_x(radians)
}

/// Rotation around the y axis by `radians` (right handed).
pub fn rotation_y(radians: f64) -> Matrix {
    Matrix::from_rotation_y(radians)
}

/// Rotation around the z axis by `radians` (right handed).
pub fn rotation_z(radians: f64) -> Matrix {
    Matrix::from_rotation_z(radians)
}

/// Shear each component in proportion to the other two.
///
/// `xy` moves x in proportion to y, `zx` moves z in proportion to x, and so on.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Matrix {
    Matrix::from_rows([
        [1.0, xy, xz, 0.0],
        [yx, 1.0, yz, 0.0],
        [zx, zy, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// World-to-eye transform for an eye at `from` looking at `to`.
///
/// `up` only needs to be roughly perpendicular to the view direction.
pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Matrix {
    let forward = (to - from).normalized();
    let left = forward.cross(up.normalized());
    let true_up = left.cross(forward);
    let orientation = Matrix::from_rows([
        [left.x, left.y, left.z, 0.0],
        [true_up.x, true_up.y, true_up.z, 0.0],
        [-forward.x, -forward.y, -forward.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    orientation * translation(-from.x, -from.y, -from.z)
}

/// Fluent transform composition.
///
/// Operations apply in call order, so
/// `TransformBuilder::new().rotate_x(a).scale(..).translate(..)` rotates
/// first and translates last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformBuilder {
    matrix: Matrix,
}

impl Default for TransformBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformBuilder {
    pub fn new() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
        }
    }

    /// Append an arbitrary transform.
    pub fn then(mut self, m: Matrix) -> Self {
        self.matrix = m * self.matrix;
        self
    }

    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        self.then(translation(x, y, z))
    }

    pub fn scale(self, x: f64, y: f64, z: f64) -> Self {
        self.then(scaling(x, y, z))
    }

    pub fn rotate_x(self, radians: f64) -> Self {
        self.then(rotation_x(radians))
    }

    pub fn rotate_y(self, radians: f64) -> Self {
        self.then(rotation_y(radians))
    }

    pub fn rotate_z(self, radians: f64) -> Self {
        self.then(rotation_z(radians))
    }

    pub fn shear(self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        self.then(shearing(xy, xz, yx, yz, zx, zy))
    }

    pub fn build(self) -> Matrix {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point, vector, ApproxEq};
    use std::f64::consts::PI;

    #[test]
    fn test_translation() {
        let t = translation(5.0, -3.0, 2.0);
        assert_eq!(t * point(-3.0, 4.0, 5.0), point(2.0, 1.0, 7.0));
        let inv = t.try_inverse().unwrap();
        assert_eq!(inv * point(-3.0, 4.0, 5.0), point(-8.0, 7.0, 3.0));
        // Vectors carry no position
        assert_eq!(t * vector(-3.0, 4.0, 5.0), vector(-3.0, 4.0, 5.0));
    }

    #[test]
    fn test_scaling() {
        let s = scaling(2.0, 3.0, 4.0);
        assert_eq!(s * point(-4.0, 6.0, 8.0), point(-8.0, 18.0, 32.0));
        assert_eq!(s * vector(-4.0, 6.0, 8.0), vector(-8.0, 18.0, 32.0));
        let inv = s.try_inverse().unwrap();
        assert!((inv * vector(-4.0, 6.0, 8.0)).approx_eq(&vector(-2.0, 2.0, 2.0)));
        assert_eq!(scaling(-1.0, 1.0, 1.0) * point(2.0, 3.0, 4.0), point(-2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotations() {
        let half = 2.0_f64.sqrt() / 2.0;
        let p = point(0.0, 1.0, 0.0);
        assert!((rotation_x(PI / 4.0) * p).approx_eq(&point(0.0, half, half)));
        assert!((rotation_x(PI / 2.0) * p).approx_eq(&point(0.0, 0.0, 1.0)));
        let inv = rotation_x(PI / 4.0).try_inverse().unwrap();
        assert!((inv * p).approx_eq(&point(0.0, half, -half)));

        let p = point(0.0, 0.0, 1.0);
        assert!((rotation_y(PI / 4.0) * p).approx_eq(&point(half, 0.0, half)));
        assert!((rotation_y(PI / 2.0) * p).approx_eq(&point(1.0, 0.0, 0.0)));

        let p = point(0.0, 1.0, 0.0);
        assert!((rotation_z(PI / 4.0) * p).approx_eq(&point(-half, half, 0.0)));
        assert!((rotation_z(PI / 2.0) * p).approx_eq(&point(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_shearing() {
        let p = point(2.0, 3.0, 4.0);
        assert_eq!(shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0) * p, point(5.0, 3.0, 4.0));
        assert_eq!(shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0) * p, point(6.0, 3.0, 4.0));
        assert_eq!(shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0) * p, point(2.0, 5.0, 4.0));
        assert_eq!(shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0) * p, point(2.0, 7.0, 4.0));
        assert_eq!(shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0) * p, point(2.0, 3.0, 6.0));
        assert_eq!(shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0) * p, point(2.0, 3.0, 7.0));
    }

    #[test]
    fn test_chained_transforms_apply_in_reverse_order() {
        let p = point(1.0, 0.0, 1.0);
        let a = rotation_x(PI / 2.0);
        let b = scaling(5.0, 5.0, 5.0);
        let c = translation(10.0, 5.0, 7.0);
        assert!((c * b * a * p).approx_eq(&point(15.0, 0.0, 7.0)));

        let built = TransformBuilder::new()
            .rotate_x(PI / 2.0)
            .scale(5.0, 5.0, 5.0)
            .translate(10.0, 5.0, 7.0)
            .build();
        assert!(built.approx_eq(&(c * b * a)));
    }

    #[test]
    fn test_view_transform_default_orientation() {
        let t = view_transform(point(0.0, 0.0, 0.0), point(0.0, 0.0, -1.0), vector(0.0, 1.0, 0.0));
        assert!(t.approx_eq(&Matrix::IDENTITY));
    }

    #[test]
    fn test_view_transform_looking_backwards() {
        let t = view_transform(point(0.0, 0.0, 0.0), point(0.0, 0.0, 1.0), vector(0.0, 1.0, 0.0));
        assert!(t.approx_eq(&scaling(-1.0, 1.0, -1.0)));
    }

    #[test]
    fn test_view_transform_moves_the_world() {
        let t = view_transform(point(0.0, 0.0, 8.0), point(0.0, 0.0, 0.0), vector(0.0, 1.0, 0.0));
        assert!(t.approx_eq(&translation(0.0, 0.0, -8.0)));
    }

    #[test]
    fn test_view_transform_arbitrary() {
        let t = view_transform(point(1.0, 3.0, 2.0), point(4.0, -2.0, 8.0), vector(1.0, 1.0, 0.0));
        let expected = Matrix::from_rows([
            [-0.50709, 0.50709, 0.67612, -2.36643],
            [0.76772, 0.60609, 0.12122, -2.82843],
            [-0.35857, 0.59761, -0.71714, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(t.approx_eq(&expected));
    }
}
