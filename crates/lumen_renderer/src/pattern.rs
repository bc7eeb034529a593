//! Procedural and texture-mapped surface patterns.

use crate::uv::face_from_point;
use crate::{Color, SceneResult, ShapeArena, ShapeId, UvMapping, UvPattern};
use lumen_math::{Matrix, MatrixExt, Tuple};

/// The color function of a pattern, evaluated in pattern space.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    Solid(Color),
    /// Alternates on `floor(x)`.
    Stripe(Color, Color),
    /// Alternates on the distance from the y axis.
    Ring(Color, Color),
    /// 3D checkerboard of unit cubes.
    Checker(Color, Color),
    /// Linear blend from the first color to the second across each unit of x.
    Gradient(Color, Color),
    TextureMap {
        uv: UvPattern,
        mapping: UvMapping,
    },
    /// One UV pattern per cube face, in [`CubeFace`](crate::CubeFace) order.
    CubeMap(Box<[UvPattern; 6]>),
    /// Returns the pattern-space point as a color.
    Test,
}

/// A pattern and its pattern-to-object transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    kind: PatternKind,
    transform: Matrix,
    inverse: Matrix,
}

fn alternate(index: f64, a: Color, b: Color) -> Color {
    if (index as i64).rem_euclid(2) == 0 {
        a
    } else {
        b
    }
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: Matrix::IDENTITY,
            inverse: Matrix::IDENTITY,
        }
    }

    pub fn solid(c: Color) -> Self {
        Self::new(PatternKind::Solid(c))
    }

    pub fn stripe(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Stripe(a, b))
    }

    pub fn ring(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Ring(a, b))
    }

    pub fn checker(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Checker(a, b))
    }

    pub fn gradient(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Gradient(a, b))
    }

    pub fn texture_map(uv: UvPattern, mapping: UvMapping) -> Self {
        Self::new(PatternKind::TextureMap { uv, mapping })
    }

    pub fn cube_map(
        left: UvPattern,
        front: UvPattern,
        right: UvPattern,
        back: UvPattern,
        up: UvPattern,
        down: UvPattern,
    ) -> Self {
        Self::new(PatternKind::CubeMap(Box::new([
            left, front, right, back, up, down,
        ])))
    }

    pub fn test() -> Self {
        Self::new(PatternKind::Test)
    }

    /// Set the pattern transform. Fails if the matrix cannot be inverted.
    pub fn with_transform(mut self, transform: Matrix) -> SceneResult<Self> {
        self.inverse = transform.try_inverse()?;
        self.transform = transform;
        Ok(self)
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Color at a point already in pattern space.
    pub fn pattern_at(&self, p: Tuple) -> Color {
        match &self.kind {
            PatternKind::Solid(c) => *c,
            PatternKind::Stripe(a, b) => alternate(p.x.floor(), *a, *b),
            PatternKind::Ring(a, b) => alternate((p.x * p.x + p.z * p.z).sqrt().floor(), *a, *b),
            PatternKind::Checker(a, b) => {
                alternate(p.x.floor() + p.y.floor() + p.z.floor(), *a, *b)
            }
            PatternKind::Gradient(a, b) => *a + (*b - *a) * (p.x - p.x.floor()),
            PatternKind::TextureMap { uv, mapping } => {
                let (u, v) = mapping.map(p);
                uv.uv_pattern_at(u, v)
            }
            PatternKind::CubeMap(faces) => {
                let face = face_from_point(p);
                let (u, v) = face.uv(p);
                faces[face.index()].uv_pattern_at(u, v)
            }
            PatternKind::Test => Color::new(p.x, p.y, p.z),
        }
    }

    /// Color on `object` at a world-space point.
    pub fn pattern_at_shape(
        &self,
        shapes: &ShapeArena,
        object: ShapeId,
        world_point: Tuple,
    ) -> Color {
        let object_point = shapes.world_to_object(object, world_point);
        self.pattern_at(self.inverse * object_point)
    }
}
