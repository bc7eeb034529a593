//! Lumen renderer - CPU Whitted-style ray tracing.
//!
//! Scenes are built in a [`ShapeArena`]: primitives, groups and CSG
//! composites addressed by [`ShapeId`], each with a transform and a Phong
//! [`Material`]. A [`World`] holds the arena, its root objects and the
//! lights; a [`Camera`] turns pixels into rays and renders the world either
//! sequentially or in parallel buckets.

mod arena;
mod bucket;
mod camera;
mod color;
mod cone;
mod csg;
mod cube;
mod cylinder;
mod error;
mod group;
mod intersection;
mod light;
mod material;
mod pattern;
mod plane;
mod renderer;
mod sequence;
mod shape;
mod sphere;
mod test_shape;
mod triangle;
mod uv;
mod world;

pub use arena::ShapeArena;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use color::{color, colors, Color};
pub use cone::Cone;
pub use csg::{Csg, CsgOperation};
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use error::{SceneError, SceneResult};
pub use group::Group;
pub use intersection::{Computations, Intersection, Intersections};
pub use light::Light;
pub use material::Material;
pub use pattern::{Pattern, PatternKind};
pub use plane::Plane;
pub use renderer::{
    channel_to_u8, color_to_rgb, render, render_parallel, render_pixel, ImageBuffer, RenderConfig,
};
pub use sequence::Sequence;
pub use shape::{Geometry, LocalGeometry, Shape, ShapeId};
pub use sphere::Sphere;
pub use test_shape::TestShape;
pub use triangle::{SmoothTriangle, Triangle};
pub use uv::{
    cube_uv_back, cube_uv_down, cube_uv_front, cube_uv_left, cube_uv_right, cube_uv_up,
    cylindrical_map, face_from_point, planar_map, spherical_map, CubeFace, UvMapping, UvPattern,
};
pub use world::{World, DEFAULT_MAX_DEPTH};

/// Re-export the algebra types scenes are described with
pub use lumen_math::{
    point, rotation_x, rotation_y, rotation_z, scaling, shearing, translation, vector,
    view_transform, ApproxEq, BoundingBox, MathError, Matrix, MatrixExt, Ray, TransformBuilder,
    Tuple, TupleExt, EPSILON,
};
