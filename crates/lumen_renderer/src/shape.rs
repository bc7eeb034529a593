//! Shape nodes: a local geometry plus transform, material and parent link.

use crate::{
    Cone, Csg, Cube, Cylinder, Group, Intersection, Material, Plane, SceneResult, SmoothTriangle,
    Sphere, TestShape, Triangle,
};
use lumen_math::{ApproxEq, BoundingBox, Matrix, MatrixExt, Ray, Tuple};

/// Stable handle to a shape stored in a [`ShapeArena`](crate::ShapeArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    /// Position of the shape in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local-space behavior shared by every leaf primitive.
///
/// Rays and points handed to these methods are already in the shape's own
/// object space.
pub trait LocalGeometry {
    /// Append every intersection of `ray` with this geometry to `xs`.
    ///
    /// `id` is the handle of the owning shape and is stamped onto each hit.
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>);

    /// Surface normal at `point`. `hit` carries u/v for smooth triangles.
    fn local_normal_at(&self, point: Tuple, hit: &Intersection) -> Tuple;

    /// Object-space bounds.
    fn local_bounds(&self) -> BoundingBox;
}

/// Every kind of node the scene graph can hold.
#[derive(Debug)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Group),
    Csg(Csg),
    Test(TestShape),
}

impl Geometry {
    /// The leaf primitive behind this node, or `None` for groups and CSG.
    pub fn primitive(&self) -> Option<&dyn LocalGeometry> {
        match self {
            Geometry::Sphere(s) => Some(s),
            Geometry::Plane(p) => Some(p),
            Geometry::Cube(c) => Some(c),
            Geometry::Cylinder(c) => Some(c),
            Geometry::Cone(c) => Some(c),
            Geometry::Triangle(t) => Some(t),
            Geometry::SmoothTriangle(t) => Some(t),
            Geometry::Test(t) => Some(t),
            Geometry::Group(_) | Geometry::Csg(_) => None,
        }
    }

    /// Short name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Sphere(_) => "sphere",
            Geometry::Plane(_) => "plane",
            Geometry::Cube(_) => "cube",
            Geometry::Cylinder(_) => "cylinder",
            Geometry::Cone(_) => "cone",
            Geometry::Triangle(_) => "triangle",
            Geometry::SmoothTriangle(_) => "smooth triangle",
            Geometry::Group(_) => "group",
            Geometry::Csg(_) => "csg",
            Geometry::Test(_) => "test shape",
        }
    }
}

/// A node in the scene graph.
///
/// Shapes are built with identity transform and default material, adjusted
/// with the `with_*` builders, then moved into a `ShapeArena`.
#[derive(Debug)]
pub struct Shape {
    geometry: Geometry,
    transform: Matrix,
    inverse: Matrix,
    inverse_transpose: Matrix,
    pub material: Material,
    /// Whether this shape blocks light in shadow tests.
    pub casts_shadow: bool,
    parent: Option<ShapeId>,
}

impl Shape {
    /// Wrap `geometry` with an identity transform and the default material.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            transform: Matrix::IDENTITY,
            inverse: Matrix::IDENTITY,
            inverse_transpose: Matrix::IDENTITY,
            material: Material::default(),
            casts_shadow: true,
            parent: None,
        }
    }

    /// Unit sphere at the origin.
    pub fn sphere() -> Self {
        Self::new(Geometry::Sphere(Sphere))
    }

    /// Unit sphere with a clear glass material.
    pub fn glass_sphere() -> Self {
        let mut shape = Self::sphere();
        shape.material.transparency = 1.0;
        shape.material.refractive_index = 1.5;
        shape
    }

    /// The xz plane.
    pub fn plane() -> Self {
        Self::new(Geometry::Plane(Plane))
    }

    /// Axis-aligned cube from -1 to 1.
    pub fn cube() -> Self {
        Self::new(Geometry::Cube(Cube))
    }

    /// Infinite open cylinder of radius 1 around the y axis.
    pub fn cylinder() -> Self {
        Self::new(Geometry::Cylinder(Cylinder::default()))
    }

    /// Cylinder cut to `minimum < y < maximum`, optionally capped.
    pub fn truncated_cylinder(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::new(Geometry::Cylinder(Cylinder::new(minimum, maximum, closed)))
    }

    /// Infinite open double cone with its apex at the origin.
    pub fn cone() -> Self {
        Self::new(Geometry::Cone(Cone::default()))
    }

    /// Cone cut to `minimum < y < maximum`, optionally capped.
    pub fn truncated_cone(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::new(Geometry::Cone(Cone::new(minimum, maximum, closed)))
    }

    /// Flat triangle through three points.
    pub fn triangle(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        Self::new(Geometry::Triangle(Triangle::new(p1, p2, p3)))
    }

    /// Triangle with per-vertex normals interpolated across the face.
    pub fn smooth_triangle(
        p1: Tuple,
        p2: Tuple,
        p3: Tuple,
        n1: Tuple,
        n2: Tuple,
        n3: Tuple,
    ) -> Self {
        Self::new(Geometry::SmoothTriangle(SmoothTriangle::new(
            p1, p2, p3, n1, n2, n3,
        )))
    }

    /// Empty group. Children are attached through the arena.
    pub fn group() -> Self {
        Self::new(Geometry::Group(Group::default()))
    }

    /// Diagnostic shape that records the last local ray it saw.
    pub fn test_shape() -> Self {
        Self::new(Geometry::Test(TestShape::default()))
    }

    /// Set the object-to-parent transform.
    ///
    /// Fails if the matrix cannot be inverted.
    pub fn with_transform(mut self, transform: Matrix) -> SceneResult<Self> {
        self.set_transform_matrix(transform)?;
        Ok(self)
    }

    /// Set a transform whose inverse is known in closed form.
    pub(crate) fn with_transform_and_inverse(mut self, transform: Matrix, inverse: Matrix) -> Self {
        debug_assert!((transform * inverse).approx_eq(&Matrix::IDENTITY));
        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transpose();
        self
    }

    /// Replace the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set whether the shape blocks light in shadow tests.
    pub fn with_casts_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    /// What kind of shape this is, with its local parameters.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    /// Object-to-parent transform.
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Parent-to-object transform.
    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    /// Transpose of the inverse, used to carry normals out of object space.
    pub fn inverse_transpose(&self) -> &Matrix {
        &self.inverse_transpose
    }

    /// Enclosing group or CSG node, if any.
    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ShapeId>) {
        self.parent = parent;
    }

    pub(crate) fn set_transform_matrix(&mut self, transform: Matrix) -> SceneResult<()> {
        let inverse = transform.try_inverse()?;
        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transpose();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneError;
    use lumen_math::{scaling, translation, MathError};

    #[test]
    fn test_default_shape() {
        let s = Shape::test_shape();
        assert_eq!(*s.transform(), Matrix::IDENTITY);
        assert_eq!(s.material, Material::default());
        assert!(s.casts_shadow);
        assert!(s.parent().is_none());
    }

    #[test]
    fn test_with_transform_caches_inverse() {
        let s = Shape::sphere()
            .with_transform(translation(2.0, 3.0, 4.0))
            .unwrap();
        assert_eq!(*s.transform(), translation(2.0, 3.0, 4.0));
        assert_eq!(*s.inverse(), translation(-2.0, -3.0, -4.0));
    }

    #[test]
    fn test_known_inverse_matches_computed_inverse() {
        let known = Shape::sphere()
            .with_transform_and_inverse(scaling(0.5, 0.5, 0.5), scaling(2.0, 2.0, 2.0));
        let computed = Shape::sphere()
            .with_transform(scaling(0.5, 0.5, 0.5))
            .unwrap();
        assert_eq!(known.transform(), computed.transform());
        assert!(known.inverse().approx_eq(computed.inverse()));
        assert!(known.inverse_transpose().approx_eq(computed.inverse_transpose()));
    }

    #[test]
    fn test_singular_transform_is_rejected() {
        let err = Shape::sphere()
            .with_transform(scaling(1.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, SceneError::Math(MathError::SingularMatrix(_))));
    }

    #[test]
    fn test_glass_sphere() {
        let s = Shape::glass_sphere();
        assert_eq!(*s.transform(), Matrix::IDENTITY);
        assert_eq!(s.material.transparency, 1.0);
        assert_eq!(s.material.refractive_index, 1.5);
    }

    #[test]
    fn test_material_assignment() {
        let mut m = Material::default();
        m.ambient = 1.0;
        let s = Shape::sphere().with_material(m.clone());
        assert_eq!(s.material, m);
    }

    #[test]
    fn test_primitive_dispatch() {
        assert!(Shape::sphere().geometry().primitive().is_some());
        assert!(Shape::group().geometry().primitive().is_none());
        assert_eq!(Shape::cone().geometry().kind(), "cone");
    }
}
