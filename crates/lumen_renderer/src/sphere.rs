//! Unit sphere primitive.

use crate::{Intersection, LocalGeometry, ShapeId};
use lumen_math::{point, BoundingBox, Ray, Tuple};

/// Sphere of radius 1 centered on the object-space origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere;

impl LocalGeometry for Sphere {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        // Vector from the sphere's center to the ray origin
        let sphere_to_ray = ray.origin - point(0.0, 0.0, 0.0);

        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(sphere_to_ray);
        let c = sphere_to_ray.dot(sphere_to_ray) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return;
        }

        let sqrtd = discriminant.sqrt();
        xs.push(Intersection::new((-b - sqrtd) / (2.0 * a), id));
        xs.push(Intersection::new((-b + sqrtd) / (2.0 * a), id));
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        p - point(0.0, 0.0, 0.0)
    }

    fn local_bounds(&self) -> BoundingBox {
        BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
