//! Groups: ordered collections of child shapes sharing a transform.

use std::sync::OnceLock;

use crate::intersection::sort_by_time;
use crate::{Geometry, Intersection, SceneResult, Shape, ShapeArena, ShapeId};
use lumen_math::{BoundingBox, Ray};

/// Children of a group node, plus the cached union of their bounds.
#[derive(Debug, Default)]
pub struct Group {
    pub(crate) children: Vec<ShapeId>,
    pub(crate) bounds: OnceLock<BoundingBox>,
}

impl Group {
    /// Direct children in insertion order.
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl ShapeArena {
    pub(crate) fn intersect_group(
        &self,
        id: ShapeId,
        group: &Group,
        ray: &Ray,
        xs: &mut Vec<Intersection>,
    ) {
        if self.prune_with_bounds && !self.bounds(id).intersects(ray) {
            return;
        }

        let start = xs.len();
        for &child in &group.children {
            self.intersect_into(child, ray, xs);
        }
        sort_by_time(&mut xs[start..]);
    }

    /// Recursively split crowded groups into a shallow bounding hierarchy.
    ///
    /// A group with at least `threshold` children has those that fit wholly
    /// inside one half of its bounds moved into a new sub-group for that
    /// half; children straddling the split stay where they are. The pass
    /// then recurses into every child, including CSG operands.
    pub fn divide(&mut self, id: ShapeId, threshold: usize) -> SceneResult<()> {
        let crowded = match self.get(id).map(Shape::geometry) {
            Some(Geometry::Group(g)) => g.len() >= threshold,
            Some(Geometry::Csg(_)) => false,
            Some(_) => return Ok(()),
            None => return Err(crate::SceneError::UnknownShape(id)),
        };

        if crowded {
            self.partition_into_subgroups(id)?;
        }

        for child in self.children(id).to_vec() {
            self.divide(child, threshold)?;
        }
        Ok(())
    }

    fn partition_into_subgroups(&mut self, id: ShapeId) -> SceneResult<()> {
        let children = self.children(id).to_vec();
        let (left_box, right_box) = self.bounds(id).split();

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut remaining = Vec::new();
        for child in children.iter().copied() {
            let b = self.parent_space_bounds(child);
            if left_box.contains_box(&b) {
                left.push(child);
            } else if right_box.contains_box(&b) {
                right.push(child);
            } else {
                remaining.push(child);
            }
        }

        // Moving every child into one sub-group would only add a level
        if (left.is_empty() && right.is_empty())
            || left.len() == children.len()
            || right.len() == children.len()
        {
            return Ok(());
        }

        log::debug!(
            "dividing group {:?}: {} left, {} right, {} kept",
            id,
            left.len(),
            right.len(),
            remaining.len()
        );

        if let Geometry::Group(g) = self.shape_mut(id).geometry_mut() {
            g.children = remaining;
        }
        for &child in left.iter().chain(right.iter()) {
            self.shape_mut(child).set_parent(None);
        }

        for members in [left, right] {
            if members.is_empty() {
                continue;
            }
            let sub = self.add(Shape::group());
            self.add_children(sub, &members)?;
            self.add_child(id, sub)?;
        }
        Ok(())
    }
}
