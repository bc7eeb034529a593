//! Axis-aligned cube primitive.

use crate::{Intersection, LocalGeometry, ShapeId};
use lumen_math::{point, vector, BoundingBox, Ray, Tuple};

const UNIT_BOX: BoundingBox = BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0));

/// Cube spanning -1..1 on every axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cube;

impl LocalGeometry for Cube {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let (tmin, tmax) = UNIT_BOX.slab(ray);
        if tmin > tmax {
            return;
        }
        xs.push(Intersection::new(tmin, id));
        xs.push(Intersection::new(tmax, id));
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        // The face is picked by the component with the largest magnitude
        let maxc = p.x.abs().max(p.y.abs()).max(p.z.abs());
        if maxc == p.x.abs() {
            vector(p.x, 0.0, 0.0)
        } else if maxc == p.y.abs() {
            vector(0.0, p.y, 0.0)
        } else {
            vector(0.0, 0.0, p.z)
        }
    }

    fn local_bounds(&self) -> BoundingBox {
        UNIT_BOX
    }
}
