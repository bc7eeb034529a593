//! Infinite xz plane.

use crate::{Intersection, LocalGeometry, ShapeId};
use lumen_math::{point, vector, BoundingBox, Ray, Tuple, EPSILON};

/// The plane y = 0, facing +y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane;

impl LocalGeometry for Plane {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        // Parallel or coplanar rays never register a hit
        if ray.direction.y.abs() < EPSILON {
            return;
        }
        xs.push(Intersection::new(-ray.origin.y / ray.direction.y, id));
    }

    fn local_normal_at(&self, _point: Tuple, _hit: &Intersection) -> Tuple {
        vector(0.0, 1.0, 0.0)
    }

    fn local_bounds(&self) -> BoundingBox {
        BoundingBox::new(
            point(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
            point(f64::INFINITY, 0.0, f64::INFINITY),
        )
    }
}
