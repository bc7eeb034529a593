//! Light sources.

use crate::{Color, Sequence, World};
use lumen_math::{vector, Tuple};

/// A rectangular area light sampled on a `usteps × vsteps` grid.
///
/// A point light is the degenerate case: a single cell with zero-length
/// edges, so every sample lands on the corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub corner: Tuple,
    /// Edge of one grid cell along u
    pub uvec: Tuple,
    pub usteps: usize,
    /// Edge of one grid cell along v
    pub vvec: Tuple,
    pub vsteps: usize,
    pub intensity: Color,
    jitter: Sequence,
}

impl Light {
    /// Light emitted from a single point.
    pub fn point(position: Tuple, intensity: Color) -> Self {
        Self {
            corner: position,
            uvec: vector(0.0, 0.0, 0.0),
            usteps: 1,
            vvec: vector(0.0, 0.0, 0.0),
            vsteps: 1,
            intensity,
            jitter: Sequence::constant(0.0),
        }
    }

    /// Area light spanning `full_uvec` and `full_vvec` from `corner`.
    ///
    /// Samples start at the center of each cell; use [`Light::with_jitter`]
    /// to spread them. Step counts of zero are treated as one.
    pub fn area(
        corner: Tuple,
        full_uvec: Tuple,
        usteps: usize,
        full_vvec: Tuple,
        vsteps: usize,
        intensity: Color,
    ) -> Self {
        let usteps = usteps.max(1);
        let vsteps = vsteps.max(1);
        Self {
            corner,
            uvec: full_uvec / usteps as f64,
            usteps,
            vvec: full_vvec / vsteps as f64,
            vsteps,
            intensity,
            jitter: Sequence::constant(0.5),
        }
    }

    /// Offsets applied to sample positions inside each cell.
    pub fn with_jitter(mut self, jitter: Sequence) -> Self {
        self.jitter = jitter;
        self
    }

    /// A fresh copy of this light's jitter sequence, cursor at the start.
    pub fn jitter(&self) -> Sequence {
        let mut jitter = self.jitter.clone();
        jitter.reset();
        jitter
    }

    /// Number of sample positions, one per grid cell.
    ///
    /// Never zero, so it is always safe to divide by.
    pub fn samples(&self) -> usize {
        (self.usteps * self.vsteps).max(1)
    }

    /// Center of the light.
    pub fn position(&self) -> Tuple {
        self.corner
            + self.uvec * (self.usteps as f64 / 2.0)
            + self.vvec * (self.vsteps as f64 / 2.0)
    }

    /// Sample position inside cell `(u, v)`, offset by the next two jitter values.
    pub fn point_on_light(&self, u: usize, v: usize, jitter: &mut Sequence) -> Tuple {
        self.corner
            + self.uvec * (u as f64 + jitter.next())
            + self.vvec * (v as f64 + jitter.next())
    }

    /// Every sample position, row by row.
    pub fn sample_points<'a>(
        &'a self,
        jitter: &'a mut Sequence,
    ) -> impl Iterator<Item = Tuple> + 'a {
        (0..self.vsteps)
            .flat_map(move |v| (0..self.usteps).map(move |u| (u, v)))
            .map(move |(u, v)| self.point_on_light(u, v, jitter))
    }

    /// Fraction of this light reaching `point` in `world`.
    pub fn intensity_at(&self, point: Tuple, world: &World, jitter: &mut Sequence) -> f64 {
        world.intensity_at(point, self, jitter)
    }
}
