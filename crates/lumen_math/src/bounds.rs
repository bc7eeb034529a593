use crate::{point, ApproxEq, Matrix, MatrixExt, Ray, Tuple, EPSILON};

/// Axis-aligned bounding box used to prune group and CSG traversal.
///
/// The empty box has `min = +inf` and `max = -inf` on every axis, so adding
/// any point to it yields a degenerate box around that point. Unbounded
/// shapes (planes, open cylinders and cones) use infinite extents.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Tuple,
    pub max: Tuple,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Box containing nothing.
    pub const fn empty() -> Self {
        Self {
            min: point(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: point(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub const fn new(min: Tuple, max: Tuple) -> Self {
        Self { min, max }
    }

    /// True when no point has been added (any axis has min > max).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include `p`.
    pub fn add_point(&mut self, p: Tuple) {
        // f64::min/max skip NaN, which shows up when an infinite extent is rotated
        self.min = point(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = point(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    /// Grow the box to include `other`.
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.add_point(other.min);
        self.add_point(other.max);
    }

    /// Inclusive containment test.
    pub fn contains_point(&self, p: Tuple) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Bounds of this box after transforming it by `m`.
    ///
    /// All eight corners are transformed and re-bounded. Matrix entries that
    /// are exactly zero contribute nothing, so `0 * inf` never turns an
    /// unbounded axis into NaN.
    pub fn transform(&self, m: &Matrix) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }

        let (lo, hi) = (self.min, self.max);
        let mut result = BoundingBox::empty();
        for &x in &[lo.x, hi.x] {
            for &y in &[lo.y, hi.y] {
                for &z in &[lo.z, hi.z] {
                    result.add_point(transform_corner(m, [x, y, z, 1.0]));
                }
            }
        }
        result
    }

    /// Slab test: does the ray's line pass through the box?
    ///
    /// Only the line matters here; hits behind the origin still count.
    pub fn intersects(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }
        let (tmin, tmax) = self.slab(ray);
        tmin <= tmax
    }

    /// Entry and exit times of the ray's line through the three slabs.
    ///
    /// The line misses the box when the entry time exceeds the exit time.
    pub fn slab(&self, ray: &Ray) -> (f64, f64) {
        let (xmin, xmax) = check_axis(ray.origin.x, ray.direction.x, self.min.x, self.max.x);
        let (ymin, ymax) = check_axis(ray.origin.y, ray.direction.y, self.min.y, self.max.y);
        let (zmin, zmax) = check_axis(ray.origin.z, ray.direction.z, self.min.z, self.max.z);

        (xmin.max(ymin).max(zmin), xmax.min(ymax).min(zmax))
    }

    /// Split the box in half along its longest axis.
    pub fn split(&self) -> (BoundingBox, BoundingBox) {
        let extent = self.max - self.min;
        let greatest = extent.x.max(extent.y).max(extent.z);

        let (mut x0, mut y0, mut z0) = (self.min.x, self.min.y, self.min.z);
        let (mut x1, mut y1, mut z1) = (self.max.x, self.max.y, self.max.z);

        if greatest == extent.x {
            x0 += extent.x / 2.0;
            x1 = x0;
        } else if greatest == extent.y {
            y0 += extent.y / 2.0;
            y1 = y0;
        } else {
            z0 += extent.z / 2.0;
            z1 = z0;
        }

        let mid_min = point(x0, y0, z0);
        let mid_max = point(x1, y1, z1);
        (
            BoundingBox::new(self.min, mid_max),
            BoundingBox::new(mid_min, self.max),
        )
    }
}

fn transform_corner(m: &Matrix, corner: [f64; 4]) -> Tuple {
    let mut out = [0.0; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = (0..4)
            .map(|col| (m.at(row, col), corner[col]))
            .filter(|(coef, _)| *coef != 0.0)
            .map(|(coef, c)| coef * c)
            .sum();
    }
    Tuple::from_array(out)
}

fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    let tmin_numerator = min - origin;
    let tmax_numerator = max - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

impl ApproxEq for BoundingBox {
    fn approx_eq(&self, other: &Self) -> bool {
        self.min.approx_eq(&other.min) && self.max.approx_eq(&other.max)
    }
}
