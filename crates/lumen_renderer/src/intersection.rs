//! Intersections, hit selection and shading precomputation.

use std::ops::Deref;

use crate::{ShapeArena, ShapeId};
use lumen_math::{Ray, Tuple, EPSILON};

/// A single ray/surface crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter at the crossing
    pub t: f64,
    /// Leaf shape that was hit
    pub object: ShapeId,
    /// Barycentric coordinates, only meaningful for triangles
    pub u: f64,
    pub v: f64,
}

impl Intersection {
    /// Crossing at time `t` without surface coordinates.
    pub fn new(t: f64, object: ShapeId) -> Self {
        Self::with_uv(t, object, 0.0, 0.0)
    }

    /// Crossing that also records barycentric `u`/`v`, used by smooth triangles.
    pub fn with_uv(t: f64, object: ShapeId, u: f64, v: f64) -> Self {
        Self { t, object, u, v }
    }
}

/// Sort a run of intersections by ascending time.
pub(crate) fn sort_by_time(xs: &mut [Intersection]) {
    xs.sort_by(|a, b| a.t.total_cmp(&b.t));
}

/// A time-ordered list of intersections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intersections(Vec<Intersection>);

impl Intersections {
    /// Sort `xs` by time.
    pub fn new(mut xs: Vec<Intersection>) -> Self {
        sort_by_time(&mut xs);
        Self(xs)
    }

    /// The visible hit: lowest non-negative time.
    pub fn hit(&self) -> Option<&Intersection> {
        self.hit_with(false)
    }

    /// Lowest qualifying time; negative times only qualify when asked for.
    pub fn hit_with(&self, include_negative: bool) -> Option<&Intersection> {
        self.0
            .iter()
            .filter(|i| include_negative || i.t >= 0.0)
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }

    pub fn into_vec(self) -> Vec<Intersection> {
        self.0
    }
}

impl Deref for Intersections {
    type Target = [Intersection];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Intersection>> for Intersections {
    fn from(xs: Vec<Intersection>) -> Self {
        Self::new(xs)
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Intersection;
    type IntoIter = std::slice::Iter<'a, Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Everything shading needs to know about a hit, computed once.
#[derive(Debug, Clone, Copy)]
pub struct Computations {
    pub t: f64,
    pub object: ShapeId,
    pub point: Tuple,
    /// Point nudged along the normal, origin for shadow and reflection rays
    pub over_point: Tuple,
    /// Point nudged against the normal, origin for refraction rays
    pub under_point: Tuple,
    pub eyev: Tuple,
    pub normalv: Tuple,
    pub reflectv: Tuple,
    /// The hit is on the inside of the surface (normal was flipped)
    pub inside: bool,
    /// Refractive index of the medium being left
    pub n1: f64,
    /// Refractive index of the medium being entered
    pub n2: f64,
}

impl Computations {
    /// Precompute shading data for `hit`.
    ///
    /// `xs` is the full time-sorted list the hit came from; it is replayed to
    /// find which transparent shapes contain the hit point.
    pub fn prepare(
        hit: &Intersection,
        ray: &Ray,
        xs: &[Intersection],
        shapes: &ShapeArena,
    ) -> Self {
        let point = ray.position(hit.t);
        let eyev = -ray.direction;
        let mut normalv = shapes.normal_at(hit.object, point, hit);

        let inside = normalv.dot(eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        let (n1, n2) = refractive_indices(hit, xs, shapes);

        Self {
            t: hit.t,
            object: hit.object,
            point,
            over_point: point + normalv * EPSILON,
            under_point: point - normalv * EPSILON,
            eyev,
            normalv,
            reflectv: ray.direction.reflect(normalv),
            inside,
            n1,
            n2,
        }
    }

    /// Fraction of light reflected at the hit (Schlick's approximation).
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(self.normalv);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                // Total internal reflection
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

/// Replay `xs` up to `hit`, tracking which shapes the ray is inside.
fn refractive_indices(hit: &Intersection, xs: &[Intersection], shapes: &ShapeArena) -> (f64, f64) {
    let index_of = |containers: &[ShapeId]| {
        containers
            .last()
            .map_or(1.0, |id| shapes[*id].material.refractive_index)
    };

    let mut containers: Vec<ShapeId> = Vec::new();
    let mut n1 = 1.0;

    for i in xs {
        if i == hit {
            n1 = index_of(&containers);
        }

        match containers.iter().position(|&c| c == i.object) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(i.object),
        }

        if i == hit {
            return (n1, index_of(&containers));
        }
    }

    // The hit was not in the list; treat both sides as vacuum
    (n1, 1.0)
}
