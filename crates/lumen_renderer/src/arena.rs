//! Shape storage and scene-graph traversal.
//!
//! Every shape in a scene lives in one [`ShapeArena`] and is addressed by a
//! [`ShapeId`]. Groups and CSG nodes hold the ids of their children; each
//! child holds the id of its parent so points and normals can be carried
//! through nested transforms.

use std::ops::Index;

use crate::{
    Geometry, Intersection, Intersections, Material, SceneError, SceneResult, Shape, ShapeId,
};
use lumen_math::{BoundingBox, Matrix, Ray, Tuple, TupleExt};

/// Owner of every shape in a scene.
#[derive(Debug)]
pub struct ShapeArena {
    shapes: Vec<Shape>,
    /// Skip group and CSG children whose bounds the ray misses.
    ///
    /// Turning this off never changes what is hit, only how much work it takes.
    pub prune_with_bounds: bool,
}

impl Default for ShapeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeArena {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            prune_with_bounds: true,
        }
    }

    /// Move a shape into the arena.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        self.shapes.push(shape);
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    fn get_checked(&self, id: ShapeId) -> SceneResult<&Shape> {
        self.get(id).ok_or(SceneError::UnknownShape(id))
    }

    fn get_checked_mut(&mut self, id: ShapeId) -> SceneResult<&mut Shape> {
        self.shapes.get_mut(id.0).ok_or(SceneError::UnknownShape(id))
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    pub(crate) fn shape_mut(&mut self, id: ShapeId) -> &mut Shape {
        &mut self.shapes[id.0]
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn material_mut(&mut self, id: ShapeId) -> SceneResult<&mut Material> {
        Ok(&mut self.get_checked_mut(id)?.material)
    }

    /// Replace a shape's transform, refreshing cached bounds above it.
    pub fn set_transform(&mut self, id: ShapeId, transform: Matrix) -> SceneResult<()> {
        let shape = self.get_checked_mut(id)?;
        shape.set_transform_matrix(transform)?;
        let parent = shape.parent();
        self.invalidate_bounds(parent);
        Ok(())
    }

    pub fn set_casts_shadow(&mut self, id: ShapeId, casts_shadow: bool) -> SceneResult<()> {
        self.get_checked_mut(id)?.casts_shadow = casts_shadow;
        Ok(())
    }

    /// Append `child` to the group `group`.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) -> SceneResult<()> {
        if !matches!(self.get_checked(group)?.geometry(), Geometry::Group(_)) {
            return Err(SceneError::NotAGroup(group));
        }
        self.check_adoptable(group, child)?;

        if let Geometry::Group(g) = self.shapes[group.0].geometry_mut() {
            g.children.push(child);
        }
        self.shapes[child.0].set_parent(Some(group));
        self.invalidate_bounds(Some(group));
        Ok(())
    }

    pub fn add_children(&mut self, group: ShapeId, children: &[ShapeId]) -> SceneResult<()> {
        children
            .iter()
            .try_for_each(|&child| self.add_child(group, child))
    }

    /// Errors unless `child` may become a child of `container`.
    pub(crate) fn check_adoptable(&self, container: ShapeId, child: ShapeId) -> SceneResult<()> {
        let shape = self.get_checked(child)?;
        if child == container || self.includes(child, container) {
            return Err(SceneError::CycleDetected {
                group: container,
                child,
            });
        }
        if let Some(parent) = shape.parent() {
            return Err(SceneError::AlreadyParented { child, parent });
        }
        Ok(())
    }

    /// Direct children of a group, or the two operands of a CSG node.
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        match self.get(id).map(Shape::geometry) {
            Some(Geometry::Group(g)) => g.children(),
            Some(Geometry::Csg(c)) => c.operands(),
            _ => &[],
        }
    }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.get(id).and_then(Shape::parent)
    }

    /// Is `id` the shape `container` itself or one of its descendants?
    pub fn includes(&self, container: ShapeId, id: ShapeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == container {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Intersect a ray given in the shape's parent space.
    pub fn intersect(&self, id: ShapeId, ray: &Ray) -> Intersections {
        let mut xs = Vec::new();
        self.intersect_into(id, ray, &mut xs);
        Intersections::new(xs)
    }

    /// Append the shape's intersections with `ray` to `xs`, unsorted.
    pub(crate) fn intersect_into(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        let shape = &self[id];
        let local_ray = ray.transform(shape.inverse());

        match shape.geometry() {
            Geometry::Group(group) => self.intersect_group(id, group, &local_ray, xs),
            Geometry::Csg(csg) => self.intersect_csg(id, csg, &local_ray, xs),
            geometry => {
                if let Some(primitive) = geometry.primitive() {
                    primitive.local_intersect(&local_ray, id, xs);
                }
            }
        }
    }

    /// World-space surface normal of a leaf shape.
    pub fn normal_at(&self, id: ShapeId, world_point: Tuple, hit: &Intersection) -> Tuple {
        let local_point = self.world_to_object(id, world_point);
        let geometry = self[id].geometry();
        let local_normal = match geometry.primitive() {
            Some(primitive) => primitive.local_normal_at(local_point, hit),
            None => {
                log::warn!("normal requested on {} {:?}", geometry.kind(), id);
                local_point.to_vector()
            }
        };
        self.normal_to_world(id, local_normal)
    }

    /// Carry a world-space point into the shape's object space.
    pub fn world_to_object(&self, id: ShapeId, point: Tuple) -> Tuple {
        let shape = &self[id];
        let point = match shape.parent() {
            Some(parent) => self.world_to_object(parent, point),
            None => point,
        };
        *shape.inverse() * point
    }

    /// Carry an object-space normal out to world space.
    pub fn normal_to_world(&self, id: ShapeId, normal: Tuple) -> Tuple {
        let shape = &self[id];
        let normal = (*shape.inverse_transpose() * normal).to_vector().normalized();
        match shape.parent() {
            Some(parent) => self.normal_to_world(parent, normal),
            None => normal,
        }
    }

    /// Object-space bounds of a shape. Aggregates cache theirs.
    pub fn bounds(&self, id: ShapeId) -> BoundingBox {
        match self[id].geometry() {
            Geometry::Group(group) => {
                *group.bounds.get_or_init(|| self.union_bounds(group.children()))
            }
            Geometry::Csg(csg) => *csg.bounds.get_or_init(|| self.union_bounds(csg.operands())),
            geometry => geometry
                .primitive()
                .map_or_else(BoundingBox::empty, |p| p.local_bounds()),
        }
    }

    /// Bounds of a shape expressed in its parent's space.
    pub fn parent_space_bounds(&self, id: ShapeId) -> BoundingBox {
        self.bounds(id).transform(self[id].transform())
    }

    fn union_bounds(&self, ids: &[ShapeId]) -> BoundingBox {
        ids.iter().fold(BoundingBox::empty(), |mut acc, &child| {
            acc.merge(&self.parent_space_bounds(child));
            acc
        })
    }

    /// Drop cached bounds on `start` and every ancestor above it.
    pub(crate) fn invalidate_bounds(&mut self, start: Option<ShapeId>) {
        let mut current = start;
        while let Some(id) = current {
            let shape = &mut self.shapes[id.0];
            match shape.geometry_mut() {
                Geometry::Group(g) => {
                    g.bounds.take();
                }
                Geometry::Csg(c) => {
                    c.bounds.take();
                }
                _ => {}
            }
            current = shape.parent();
        }
    }
}

impl Index<ShapeId> for ShapeArena {
    type Output = Shape;

    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    fn index(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }
}
