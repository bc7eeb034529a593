//! Two-dimensional patterns and the mappings that wrap them onto surfaces.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::{Color, ImageBuffer};
use lumen_math::{vector, Tuple, TupleExt};

/// A pattern defined over `u, v ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum UvPattern {
    /// `width × height` checkers alternating between `a` and `b`.
    Checkers {
        width: f64,
        height: f64,
        a: Color,
        b: Color,
    },
    /// Solid `main` with a distinct color in each corner, for checking
    /// orientation of a mapping.
    AlignCheck {
        main: Color,
        ul: Color,
        ur: Color,
        bl: Color,
        br: Color,
    },
    /// Nearest-pixel lookup into an image.
    Image(Arc<ImageBuffer>),
}

impl UvPattern {
    pub fn checkers(width: f64, height: f64, a: Color, b: Color) -> Self {
        UvPattern::Checkers { width, height, a, b }
    }

    pub fn align_check(main: Color, ul: Color, ur: Color, bl: Color, br: Color) -> Self {
        UvPattern::AlignCheck { main, ul, ur, bl, br }
    }

    pub fn image(image: impl Into<Arc<ImageBuffer>>) -> Self {
        UvPattern::Image(image.into())
    }

    pub fn uv_pattern_at(&self, u: f64, v: f64) -> Color {
        match self {
            UvPattern::Checkers { width, height, a, b } => {
                let sum = (u * width).floor() + (v * height).floor();
                if (sum as i64).rem_euclid(2) == 0 {
                    *a
                } else {
                    *b
                }
            }
            UvPattern::AlignCheck { main, ul, ur, bl, br } => {
                if v > 0.8 {
                    if u < 0.2 {
                        return *ul;
                    }
                    if u > 0.8 {
                        return *ur;
                    }
                } else if v < 0.2 {
                    if u < 0.2 {
                        return *bl;
                    }
                    if u > 0.8 {
                        return *br;
                    }
                }
                *main
            }
            UvPattern::Image(image) => {
                if image.width == 0 || image.height == 0 {
                    return Color::ZERO;
                }
                // Image rows run top to bottom, v runs bottom to top
                let v = 1.0 - v;
                let x = (u * f64::from(image.width - 1)).round();
                let y = (v * f64::from(image.height - 1)).round();
                let x = x.clamp(0.0, f64::from(image.width - 1)) as u32;
                let y = y.clamp(0.0, f64::from(image.height - 1)) as u32;
                image.get(x, y)
            }
        }
    }
}

/// Projection from a 3D pattern-space point to `(u, v)`.
#[derive(Clone, Copy)]
pub enum UvMapping {
    /// Longitude/latitude around the unit sphere.
    Spherical,
    /// The xz plane, tiled every unit.
    Planar,
    /// Around the y axis, tiled every unit along y.
    Cylindrical,
    Custom(fn(Tuple) -> (f64, f64)),
}

impl UvMapping {
    pub fn map(&self, p: Tuple) -> (f64, f64) {
        match self {
            UvMapping::Spherical => spherical_map(p),
            UvMapping::Planar => planar_map(p),
            UvMapping::Cylindrical => cylindrical_map(p),
            UvMapping::Custom(f) => f(p),
        }
    }
}

impl PartialEq for UvMapping {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UvMapping::Custom(a), UvMapping::Custom(b)) => *a as usize == *b as usize,
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl fmt::Debug for UvMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvMapping::Spherical => f.write_str("Spherical"),
            UvMapping::Planar => f.write_str("Planar"),
            UvMapping::Cylindrical => f.write_str("Cylindrical"),
            UvMapping::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Azimuth around y mapped to `u`, with `u` growing counter-clockwise seen from above.
fn azimuth_u(p: Tuple) -> f64 {
    let theta = p.x.atan2(p.z);
    let raw_u = theta / (2.0 * PI);
    1.0 - (raw_u + 0.5)
}

pub fn spherical_map(p: Tuple) -> (f64, f64) {
    let radius = vector(p.x, p.y, p.z).magnitude();
    let phi = (p.y / radius).acos();
    (azimuth_u(p), 1.0 - phi / PI)
}

pub fn planar_map(p: Tuple) -> (f64, f64) {
    (p.x.rem_euclid(1.0), p.z.rem_euclid(1.0))
}

pub fn cylindrical_map(p: Tuple) -> (f64, f64) {
    (azimuth_u(p), p.y.rem_euclid(1.0))
}

/// Faces of the unit cube, in the order cube maps store them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Left,
    Front,
    Right,
    Back,
    Up,
    Down,
}

impl CubeFace {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Project a point on this face to `(u, v)`.
    pub fn uv(self, p: Tuple) -> (f64, f64) {
        match self {
            CubeFace::Left => cube_uv_left(p),
            CubeFace::Front => cube_uv_front(p),
            CubeFace::Right => cube_uv_right(p),
            CubeFace::Back => cube_uv_back(p),
            CubeFace::Up => cube_uv_up(p),
            CubeFace::Down => cube_uv_down(p),
        }
    }
}

/// The face a point lies on, chosen by its largest coordinate.
pub fn face_from_point(p: Tuple) -> CubeFace {
    let coord = p.x.abs().max(p.y.abs()).max(p.z.abs());

    if coord == p.x {
        CubeFace::Right
    } else if coord == -p.x {
        CubeFace::Left
    } else if coord == p.y {
        CubeFace::Up
    } else if coord == -p.y {
        CubeFace::Down
    } else if coord == p.z {
        CubeFace::Front
    } else {
        CubeFace::Back
    }
}

#[inline]
fn unit(a: f64) -> f64 {
    a.rem_euclid(2.0) / 2.0
}

pub fn cube_uv_front(p: Tuple) -> (f64, f64) {
    (unit(p.x + 1.0), unit(p.y + 1.0))
}

pub fn cube_uv_back(p: Tuple) -> (f64, f64) {
    (unit(1.0 - p.x), unit(p.y + 1.0))
}

pub fn cube_uv_left(p: Tuple) -> (f64, f64) {
    (unit(p.z + 1.0), unit(p.y + 1.0))
}

pub fn cube_uv_right(p: Tuple) -> (f64, f64) {
    (unit(1.0 - p.z), unit(p.y + 1.0))
}

pub fn cube_uv_up(p: Tuple) -> (f64, f64) {
    (unit(p.x + 1.0), unit(1.0 - p.z))
}

pub fn cube_uv_down(p: Tuple) -> (f64, f64) {
    (unit(p.x + 1.0), unit(p.z + 1.0))
}
