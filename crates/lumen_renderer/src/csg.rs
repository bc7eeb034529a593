//! Constructive solid geometry.
//!
//! A CSG node combines exactly two operands with a boolean operation. Both
//! operands are intersected, their hits merged in time order, and then
//! filtered by walking the list while tracking whether the ray is currently
//! inside the left and right operand.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::intersection::sort_by_time;
use crate::{Geometry, Intersection, SceneError, SceneResult, Shape, ShapeArena, ShapeId};
use lumen_math::{BoundingBox, Ray};

/// Boolean operation applied by a CSG node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsgOperation {
    Union,
    Intersection,
    Difference,
}

impl CsgOperation {
    /// Is a hit kept?
    ///
    /// `lhit` is true when the hit is on the left operand, `inl` / `inr`
    /// when the ray is currently inside the left / right operand.
    pub fn allows(self, lhit: bool, inl: bool, inr: bool) -> bool {
        match self {
            CsgOperation::Union => (lhit && !inr) || (!lhit && !inl),
            CsgOperation::Intersection => (lhit && inr) || (!lhit && inl),
            CsgOperation::Difference => (lhit && !inr) || (!lhit && inl),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CsgOperation::Union => "union",
            CsgOperation::Intersection => "intersection",
            CsgOperation::Difference => "difference",
        }
    }
}

impl FromStr for CsgOperation {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(CsgOperation::Union),
            "intersection" => Ok(CsgOperation::Intersection),
            "difference" => Ok(CsgOperation::Difference),
            other => Err(SceneError::UnknownCsgOperation(other.to_string())),
        }
    }
}

impl fmt::Display for CsgOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CSG node: an operation and its left and right operands.
#[derive(Debug)]
pub struct Csg {
    operation: CsgOperation,
    operands: [ShapeId; 2],
    pub(crate) bounds: OnceLock<BoundingBox>,
}

impl Csg {
    pub fn operation(&self) -> CsgOperation {
        self.operation
    }

    pub fn left(&self) -> ShapeId {
        self.operands[0]
    }

    pub fn right(&self) -> ShapeId {
        self.operands[1]
    }

    pub fn operands(&self) -> &[ShapeId] {
        &self.operands
    }

    /// Keep the hits that lie on the surface of the combined solid.
    ///
    /// `xs` must be sorted by time.
    pub fn filter_intersections(
        &self,
        shapes: &ShapeArena,
        xs: &[Intersection],
    ) -> Vec<Intersection> {
        let mut inl = false;
        let mut inr = false;
        let mut result = Vec::new();

        for i in xs {
            let lhit = shapes.includes(self.left(), i.object);

            if self.operation.allows(lhit, inl, inr) {
                result.push(*i);
            }

            if lhit {
                inl = !inl;
            } else {
                inr = !inr;
            }
        }
        result
    }
}

impl ShapeArena {
    /// Combine two unparented shapes into a new CSG node.
    pub fn add_csg(
        &mut self,
        operation: CsgOperation,
        left: ShapeId,
        right: ShapeId,
    ) -> SceneResult<ShapeId> {
        let id = ShapeId(self.len());
        self.check_adoptable(id, left)?;
        self.check_adoptable(id, right)?;
        if left == right {
            return Err(SceneError::AlreadyParented {
                child: right,
                parent: id,
            });
        }

        let csg = Csg {
            operation,
            operands: [left, right],
            bounds: OnceLock::new(),
        };
        let id = self.add(Shape::new(Geometry::Csg(csg)));
        self.shape_mut(left).set_parent(Some(id));
        self.shape_mut(right).set_parent(Some(id));
        Ok(id)
    }

    pub(crate) fn intersect_csg(
        &self,
        id: ShapeId,
        csg: &Csg,
        ray: &Ray,
        xs: &mut Vec<Intersection>,
    ) {
        if self.prune_with_bounds && !self.bounds(id).intersects(ray) {
            return;
        }

        let mut both = Vec::new();
        self.intersect_into(csg.left(), ray, &mut both);
        self.intersect_into(csg.right(), ray, &mut both);
        sort_by_time(&mut both);

        xs.extend(csg.filter_intersections(self, &both));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Intersections;
    use lumen_math::{point, translation, vector};

    #[test]
    fn test_csg_truth_table() {
        use CsgOperation::*;
        // (op, lhit, inl, inr, allowed)
        let cases = [
            (Union, true, true, true, false),
            (Union, true, true, false, true),
            (Union, true, false, true, false),
            (Union, true, false, false, true),
            (Union, false, true, true, false),
            (Union, false, true, false, false),
            (Union, false, false, true, true),
            (Union, false, false, false, true),
            (Intersection, true, true, true, true),
            (Intersection, true, true, false, false),
            (Intersection, true, false, true, true),
            (Intersection, true, false, false, false),
            (Intersection, false, true, true, true),
            (Intersection, false, true, false, true),
            (Intersection, false, false, true, false),
            (Intersection, false, false, false, false),
            (Difference, true, true, true, false),
            (Difference, true, true, false, true),
            (Difference, true, false, true, false),
            (Difference, true, false, false, true),
            (Difference, false, true, true, true),
            (Difference, false, true, false, true),
            (Difference, false, false, true, false),
            (Difference, false, false, false, false),
        ];
        for (op, lhit, inl, inr, expected) in cases {
            assert_eq!(
                op.allows(lhit, inl, inr),
                expected,
                "{op} lhit={lhit} inl={inl} inr={inr}"
            );
        }
    }

    #[test]
    fn test_add_csg_sets_parents() {
        let mut shapes = ShapeArena::new();
        let s1 = shapes.add(Shape::sphere());
        let s2 = shapes.add(Shape::cube());
        let c = shapes.add_csg(CsgOperation::Union, s1, s2).unwrap();

        let Geometry::Csg(csg) = shapes[c].geometry() else {
            panic!("expected a csg node");
        };
        assert_eq!(csg.operation(), CsgOperation::Union);
        assert_eq!(csg.left(), s1);
        assert_eq!(csg.right(), s2);
        assert_eq!(shapes.parent(s1), Some(c));
        assert_eq!(shapes.parent(s2), Some(c));
        assert_eq!(shapes.children(c), &[s1, s2]);
    }

    #[test]
    fn test_add_csg_rejects_bad_operands() {
        let mut shapes = ShapeArena::new();
        let s1 = shapes.add(Shape::sphere());
        let s2 = shapes.add(Shape::cube());
        let g = shapes.add(Shape::group());
        shapes.add_child(g, s2).unwrap();

        assert_eq!(
            shapes.add_csg(CsgOperation::Union, s1, s2),
            Err(SceneError::AlreadyParented { child: s2, parent: g })
        );
        assert!(matches!(
            shapes.add_csg(CsgOperation::Union, s1, s1),
            Err(SceneError::AlreadyParented { child, .. }) if child == s1
        ));
        // Failed calls leave the operands unparented
        assert_eq!(shapes.parent(s1), None);
    }

    #[test]
    fn test_filter_intersections() {
        let mut shapes = ShapeArena::new();
        let mut cases = Vec::new();
        for (op, x0, x1) in [
            (CsgOperation::Union, 0, 3),
            (CsgOperation::Intersection, 1, 2),
            (CsgOperation::Difference, 0, 1),
        ] {
            let s1 = shapes.add(Shape::sphere());
            let s2 = shapes.add(Shape::cube());
            let c = shapes.add_csg(op, s1, s2).unwrap();
            cases.push((c, s1, s2, x0, x1));
        }

        for (c, s1, s2, x0, x1) in cases {
            let xs = [
                Intersection::new(1.0, s1),
                Intersection::new(2.0, s2),
                Intersection::new(3.0, s1),
                Intersection::new(4.0, s2),
            ];
            let Geometry::Csg(csg) = shapes[c].geometry() else {
                panic!("expected a csg node");
            };
            let result = csg.filter_intersections(&shapes, &xs);
            assert_eq!(result, vec![xs[x0], xs[x1]], "{}", csg.operation());
        }
    }

    #[test]
    fn test_ray_misses_csg() {
        let mut shapes = ShapeArena::new();
        let s1 = shapes.add(Shape::sphere());
        let s2 = shapes.add(Shape::cube());
        let c = shapes.add_csg(CsgOperation::Union, s1, s2).unwrap();
        let ray = Ray::new(point(0.0, 2.0, -5.0), vector(0.0, 0.0, 1.0));
        assert!(shapes.intersect(c, &ray).is_empty());
    }

    #[test]
    fn test_ray_hits_csg() {
        let mut shapes = ShapeArena::new();
        let s1 = shapes.add(Shape::sphere());
        let s2 = shapes.add(Shape::sphere().with_transform(translation(0.0, 0.0, 0.5)).unwrap());
        let c = shapes.add_csg(CsgOperation::Union, s1, s2).unwrap();
        let ray = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));

        let xs = shapes.intersect(c, &ray);
        assert_eq!(xs.len(), 2);
        assert_eq!((xs[0].t, xs[0].object), (4.0, s1));
        assert_eq!((xs[1].t, xs[1].object), (6.5, s2));
    }

    #[test]
    fn test_csg_with_group_operand() {
        let mut shapes = ShapeArena::new();
        let g = shapes.add(Shape::group());
        let inner = shapes.add(Shape::sphere());
        shapes.add_child(g, inner).unwrap();
        let cube = shapes.add(Shape::cube().with_transform(translation(0.0, 0.0, 1.0)).unwrap());
        let c = shapes.add_csg(CsgOperation::Difference, g, cube).unwrap();

        let ray = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
        let xs = shapes.intersect(c, &ray);
        // Sphere front face survives, cube front face carves the back
        assert_eq!(xs.len(), 2);
        assert_eq!((xs[0].t, xs[0].object), (4.0, inner));
        assert_eq!((xs[1].t, xs[1].object), (5.0, cube));
    }

    #[test]
    fn test_csg_bounds_prune_operands() {
        let mut shapes = ShapeArena::new();
        let left = shapes.add(Shape::test_shape());
        let right = shapes.add(Shape::test_shape());
        let c = shapes.add_csg(CsgOperation::Difference, left, right).unwrap();

        let calls = |shapes: &ShapeArena, id: ShapeId| match shapes[id].geometry() {
            Geometry::Test(t) => t.calls(),
            _ => 0,
        };

        let miss = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 1.0, 0.0));
        shapes.intersect(c, &miss);
        assert_eq!((calls(&shapes, left), calls(&shapes, right)), (0, 0));

        let hit = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
        shapes.intersect(c, &hit);
        assert_eq!((calls(&shapes, left), calls(&shapes, right)), (1, 1));
    }

    #[test]
    fn test_csg_pruning_keeps_intersections() {
        let mut shapes = ShapeArena::new();
        let cube = shapes.add(Shape::cube());
        let bite = shapes.add(Shape::sphere().with_transform(translation(0.5, 0.5, -1.0)).unwrap());
        let c = shapes.add_csg(CsgOperation::Difference, cube, bite).unwrap();

        let rays = [
            Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0)),
            Ray::new(point(0.6, 0.6, -5.0), vector(0.0, 0.0, 1.0)),
            Ray::new(point(-5.0, 0.5, -0.5), vector(1.0, 0.0, 0.0)),
            Ray::new(point(0.0, 3.0, -5.0), vector(0.0, -0.5, 1.0)),
            Ray::new(point(0.0, 5.0, 0.0), vector(1.0, 0.0, 0.0)),
        ];
        let pruned: Vec<Intersections> = rays.iter().map(|r| shapes.intersect(c, r)).collect();
        shapes.prune_with_bounds = false;
        for (ray, expected) in rays.iter().zip(&pruned) {
            assert_eq!(&shapes.intersect(c, ray), expected, "{ray:?}");
        }
        assert!(pruned.iter().any(|xs| !xs.is_empty()));
        assert!(pruned.iter().any(|xs| xs.is_empty()));
    }

    #[test]
    fn test_csg_bounds_are_union_of_operands() {
        let mut shapes = ShapeArena::new();
        let left = shapes.add(Shape::sphere());
        let right = shapes.add(Shape::sphere().with_transform(translation(2.0, 3.0, 4.0)).unwrap());
        let c = shapes.add_csg(CsgOperation::Difference, left, right).unwrap();
        let b = shapes.bounds(c);
        assert_eq!(b.min, point(-1.0, -1.0, -1.0));
        assert_eq!(b.max, point(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("union".parse::<CsgOperation>(), Ok(CsgOperation::Union));
        assert_eq!("difference".parse::<CsgOperation>(), Ok(CsgOperation::Difference));
        assert_eq!(
            "xor".parse::<CsgOperation>(),
            Err(SceneError::UnknownCsgOperation("xor".to_string()))
        );
    }

    #[test]
    fn test_operation_serde() {
        let json = serde_json::to_string(&CsgOperation::Intersection).unwrap();
        assert_eq!(json, "\"intersection\"");
        let op: CsgOperation = serde_json::from_str("\"difference\"").unwrap();
        assert_eq!(op, CsgOperation::Difference);
        assert!(serde_json::from_str::<CsgOperation>("\"xor\"").is_err());
    }
}
