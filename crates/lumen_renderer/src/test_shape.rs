//! Diagnostic shape that records how it was intersected.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{Intersection, LocalGeometry, ShapeId};
use lumen_math::{point, vector, BoundingBox, Ray, Tuple};

/// Diagnostic geometry that never reports hits.
///
/// It remembers the last object-space ray it was given and counts how many
/// times it was asked, so tests can observe transforms and pruning.
#[derive(Debug, Default)]
pub struct TestShape {
    saved_ray: Mutex<Option<Ray>>,
    calls: AtomicUsize,
}

impl TestShape {
    pub fn saved_ray(&self) -> Option<Ray> {
        self.saved_ray.lock().ok().and_then(|r| *r)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl LocalGeometry for TestShape {
    fn local_intersect(&self, ray: &Ray, _id: ShapeId, _xs: &mut Vec<Intersection>) {
        if let Ok(mut saved) = self.saved_ray.lock() {
            *saved = Some(*ray);
        }
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    fn local_normal_at(&self, p: Tuple, _hit: &Intersection) -> Tuple {
        vector(p.x, p.y, p.z)
    }

    fn local_bounds(&self) -> BoundingBox {
        BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
