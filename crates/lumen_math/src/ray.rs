use crate::{Matrix, Tuple};

/// A ray in 3D space: an origin point and a (not necessarily unit) direction.
///
/// Directions are left unnormalized so that intersection times stay valid
/// after the ray is transformed into a scaled object space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    pub fn new(origin: Tuple, direction: Tuple) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn position(&self, t: f64) -> Tuple {
        self.origin + self.direction * t
    }

    /// Apply `m` to both origin and direction.
    #[inline]
    pub fn transform(&self, m: &Matrix) -> Ray {
        Ray {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point, scaling, translation, vector};

    #[test]
    fn test_ray_position() {
        let ray = Ray::new(point(2.0, 3.0, 4.0), vector(1.0, 0.0, 0.0));
        assert_eq!(ray.position(0.0), point(2.0, 3.0, 4.0));
        assert_eq!(ray.position(1.0), point(3.0, 3.0, 4.0));
        assert_eq!(ray.position(-1.0), point(1.0, 3.0, 4.0));
        assert_eq!(ray.position(2.5), point(4.5, 3.0, 4.0));
    }

    #[test]
    fn test_ray_translate() {
        let ray = Ray::new(point(1.0, 2.0, 3.0), vector(0.0, 1.0, 0.0));
        let moved = ray.transform(&translation(3.0, 4.0, 5.0));
        assert_eq!(moved.origin, point(4.0, 6.0, 8.0));
        assert_eq!(moved.direction, vector(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_ray_scale_keeps_direction_unnormalized() {
        let ray = Ray::new(point(1.0, 2.0, 3.0), vector(0.0, 1.0, 0.0));
        let scaled = ray.transform(&scaling(2.0, 3.0, 4.0));
        assert_eq!(scaled.origin, point(2.0, 6.0, 12.0));
        assert_eq!(scaled.direction, vector(0.0, 3.0, 0.0));
        // The original ray is untouched
        assert_eq!(ray.origin, point(1.0, 2.0, 3.0));
    }
}
