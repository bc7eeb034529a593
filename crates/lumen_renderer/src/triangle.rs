//! Flat and smooth triangle primitives.
//!
//! Both use the Möller-Trumbore algorithm for ray-triangle intersection and
//! record the barycentric (u, v) of every hit.

use crate::{Intersection, LocalGeometry, ShapeId};
use lumen_math::{BoundingBox, Ray, Tuple, TupleExt, EPSILON};

/// A triangle with a single face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Tuple,
    pub p2: Tuple,
    pub p3: Tuple,
    /// Pre-computed edges p2 - p1 and p3 - p1
    pub e1: Tuple,
    pub e2: Tuple,
    /// Pre-computed face normal (unit length)
    pub normal: Tuple,
}

impl Triangle {
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal: e2.cross(e1).normalized(),
        }
    }
}

impl LocalGeometry for Triangle {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if let Some((t, u, v)) = moller_trumbore(ray, self.p1, self.e1, self.e2) {
            xs.push(Intersection::with_uv(t, id, u, v));
        }
    }

    fn local_normal_at(&self, _point: Tuple, _hit: &Intersection) -> Tuple {
        self.normal
    }

    fn local_bounds(&self) -> BoundingBox {
        vertex_bounds(self.p1, self.p2, self.p3)
    }
}

/// A triangle whose normal is interpolated from its three vertex normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothTriangle {
    pub p1: Tuple,
    pub p2: Tuple,
    pub p3: Tuple,
    pub n1: Tuple,
    pub n2: Tuple,
    pub n3: Tuple,
    pub e1: Tuple,
    pub e2: Tuple,
}

impl SmoothTriangle {
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple, n1: Tuple, n2: Tuple, n3: Tuple) -> Self {
        Self {
            p1,
            p2,
            p3,
            n1,
            n2,
            n3,
            e1: p2 - p1,
            e2: p3 - p1,
        }
    }
}

impl LocalGeometry for SmoothTriangle {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if let Some((t, u, v)) = moller_trumbore(ray, self.p1, self.e1, self.e2) {
            xs.push(Intersection::with_uv(t, id, u, v));
        }
    }

    fn local_normal_at(&self, _point: Tuple, hit: &Intersection) -> Tuple {
        self.n2 * hit.u + self.n3 * hit.v + self.n1 * (1.0 - hit.u - hit.v)
    }

    fn local_bounds(&self) -> BoundingBox {
        vertex_bounds(self.p1, self.p2, self.p3)
    }
}

/// Returns `(t, u, v)` when the ray crosses the triangle's interior or edges.
fn moller_trumbore(ray: &Ray, p1: Tuple, e1: Tuple, e2: Tuple) -> Option<(f64, f64, f64)> {
    let dir_cross_e2 = ray.direction.cross(e2);
    let det = e1.dot(dir_cross_e2);

    // Ray is parallel to triangle
    if det.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / det;
    let p1_to_origin = ray.origin - p1;
    let u = f * p1_to_origin.dot(dir_cross_e2);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let origin_cross_e1 = p1_to_origin.cross(e1);
    let v = f * ray.direction.dot(origin_cross_e1);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    Some((f * e2.dot(origin_cross_e1), u, v))
}

fn vertex_bounds(p1: Tuple, p2: Tuple, p3: Tuple) -> BoundingBox {
    let mut bounds = BoundingBox::empty();
    bounds.add_point(p1);
    bounds.add_point(p2);
    bounds.add_point(p3);
    bounds
}
