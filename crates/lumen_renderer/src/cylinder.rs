//! Cylinder primitive, optionally truncated and capped.

use crate::{Intersection, LocalGeometry, ShapeId};
use lumen_math::{point, vector, BoundingBox, Ray, Tuple, EPSILON};

/// Radius-1 cylinder around the y axis.
///
/// `minimum` and `maximum` bound the body in y (exclusive); `closed` adds
/// end caps at those heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        }
    }
}

impl Cylinder {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn intersect_caps(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }
        for y in [self.minimum, self.maximum] {
            let t = (y - ray.origin.y) / ray.direction.y;
            if within_cap(ray, t, 1.0) {
                xs.push(Intersection::new(t, id));
            }
        }
    }
}

/// Does the ray at time `t` fall inside a cap of the given radius?
pub(crate) fn within_cap(ray: &Ray, t: f64, radius: f64) -> bool {
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    x * x + z * z <= radius * radius
}

impl LocalGeometry for Cylinder {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x * d.x + d.z * d.z;

        // Rays parallel to the y axis can only meet the caps
        if a.abs() >= EPSILON {
            let b = 2.0 * o.x * d.x + 2.0 * o.z * d.z;
            let c = o.x * o.x + o.z * o.z - 1.0;
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                return;
            }

            let sqrtd = discriminant.sqrt();
            let mut t0 = (-b - sqrtd) / (2.0 * a);
            let mut t1 = (-b + sqrtd) / (2.0 * a);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            for t in [t0, t1] {
                let y = o.y + t * d.y;
                if self.minimum < y && y < self.maximum {
                    xs.push(Intersection::new(t, id));
                }
            }
        }

        self.intersect_caps(ray, id, xs);
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        let dist = p.x * p.x + p.z * p.z;
        if dist < 1.0 && p.y >= self.maximum - EPSILON {
            vector(0.0, 1.0, 0.0)
        } else if dist < 1.0 && p.y <= self.minimum + EPSILON {
            vector(0.0, -1.0, 0.0)
        } else {
            vector(p.x, 0.0, p.z)
        }
    }

    fn local_bounds(&self) -> BoundingBox {
        BoundingBox::new(
            point(-1.0, self.minimum, -1.0),
            point(1.0, self.maximum, 1.0),
        )
    }
}
