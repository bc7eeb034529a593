//! The scene aggregate and recursive shading.

use crate::{
    color, colors, Color, Computations, Intersections, Light, Material, SceneError, SceneResult,
    Sequence, Shape, ShapeArena, ShapeId,
};
use lumen_math::{point, scaling, ApproxEq, Ray, Tuple, TupleExt};

/// Reflection/refraction bounces allowed per camera ray.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Everything that is rendered: shapes, the roots to trace against, and lights.
///
/// The world is only read while rendering, so one instance can be shared by
/// every render thread. Jitter state lives outside the world, one
/// [`Sequence`] per light, and is threaded through shading as `&mut`.
#[derive(Debug, Default)]
pub struct World {
    pub shapes: ShapeArena,
    /// Top-level shapes. Their descendants are reached through the scene graph.
    pub objects: Vec<ShapeId>,
    pub lights: Vec<Light>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two concentric spheres lit by a white point light, handy for tests.
    pub fn default_world() -> Self {
        let mut world = Self::new();
        world.add_light(Light::point(point(-10.0, 10.0, -10.0), colors::WHITE));

        let outer = Material {
            color: color(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Material::default()
        };
        world.add_object(Shape::sphere().with_material(outer));
        let half = scaling(0.5, 0.5, 0.5);
        let double = scaling(2.0, 2.0, 2.0);
        world.add_object(Shape::sphere().with_transform_and_inverse(half, double));
        world
    }

    /// Add a shape to the arena as a new root.
    pub fn add_object(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.add(shape);
        self.objects.push(id);
        id
    }

    /// Mark an existing, unparented shape as a root.
    pub fn add_root(&mut self, id: ShapeId) -> SceneResult<()> {
        let shape = self.shapes.get(id).ok_or(SceneError::UnknownShape(id))?;
        if let Some(parent) = shape.parent() {
            return Err(SceneError::AlreadyParented { child: id, parent });
        }
        if !self.objects.contains(&id) {
            self.objects.push(id);
        }
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// One jitter sequence per light, each starting `offset` values in.
    ///
    /// Renderers derive `offset` from the pixel so every pixel starts at a
    /// reproducible place in each sequence.
    pub fn jitters(&self, offset: usize) -> Vec<Sequence> {
        self.lights
            .iter()
            .map(|light| {
                let mut jitter = light.jitter();
                jitter.seek(offset);
                jitter
            })
            .collect()
    }

    /// Every intersection of `ray` with the world, sorted by time.
    pub fn intersect(&self, ray: &Ray) -> Intersections {
        let mut xs = Vec::new();
        for &id in &self.objects {
            self.shapes.intersect_into(id, ray, &mut xs);
        }
        Intersections::new(xs)
    }

    /// Color seen along `ray`, with `remaining` bounces left.
    ///
    /// Uses fresh jitter sequences; see [`World::color_at_with`] to carry
    /// jitter state across rays.
    pub fn color_at(&self, ray: &Ray, remaining: usize) -> Color {
        self.color_at_with(ray, remaining, &mut self.jitters(0))
    }

    /// Color seen along `ray`, advancing `jitters` (one per light) as
    /// area lights are sampled.
    pub fn color_at_with(&self, ray: &Ray, remaining: usize, jitters: &mut [Sequence]) -> Color {
        let xs = self.intersect(ray);
        match xs.hit() {
            Some(hit) => {
                let comps = Computations::prepare(hit, ray, &xs, &self.shapes);
                self.shade_hit(&comps, remaining, jitters)
            }
            None => colors::BLACK,
        }
    }

    /// Shade a precomputed hit: direct lighting from every light plus the
    /// reflected and refracted contributions.
    ///
    /// The visibility and lighting passes for a light draw from the same
    /// sequence, so its cursor keeps moving from hit to hit. Lights without
    /// an entry in `jitters` use a fresh copy of their own sequence.
    pub fn shade_hit(
        &self,
        comps: &Computations,
        remaining: usize,
        jitters: &mut [Sequence],
    ) -> Color {
        let material = &self.shapes[comps.object].material;
        let surface = material.surface_color(&self.shapes, comps.object, comps.over_point);

        let mut direct = colors::BLACK;
        for (i, light) in self.lights.iter().enumerate() {
            let mut fresh;
            let jitter = match jitters.get_mut(i) {
                Some(jitter) => jitter,
                None => {
                    fresh = light.jitter();
                    &mut fresh
                }
            };
            let intensity = self.intensity_at(comps.over_point, light, jitter);
            direct += material.lighting(
                surface,
                light,
                comps.over_point,
                comps.eyev,
                comps.normalv,
                intensity,
                jitter,
            );
        }

        let reflected = self.reflected_color(comps, remaining, jitters);
        let refracted = self.refracted_color(comps, remaining, jitters);

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            direct + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            direct + reflected + refracted
        }
    }

    pub fn reflected_color(
        &self,
        comps: &Computations,
        remaining: usize,
        jitters: &mut [Sequence],
    ) -> Color {
        let reflective = self.shapes[comps.object].material.reflective;
        if remaining == 0 || reflective.approx_eq(&0.0) {
            return colors::BLACK;
        }

        let ray = Ray::new(comps.over_point, comps.reflectv);
        self.color_at_with(&ray, remaining - 1, jitters) * reflective
    }

    pub fn refracted_color(
        &self,
        comps: &Computations,
        remaining: usize,
        jitters: &mut [Sequence],
    ) -> Color {
        let transparency = self.shapes[comps.object].material.transparency;
        if remaining == 0 || transparency.approx_eq(&0.0) {
            return colors::BLACK;
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            // Total internal reflection
            return colors::BLACK;
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let ray = Ray::new(comps.under_point, direction);
        self.color_at_with(&ray, remaining - 1, jitters) * transparency
    }

    /// Is anything that casts shadows between `point` and `light_position`?
    pub fn is_shadowed(&self, point: Tuple, light_position: Tuple) -> bool {
        let v = light_position - point;
        let distance = v.magnitude();
        let ray = Ray::new(point, v.normalized());

        self.intersect(&ray)
            .iter()
            .any(|i| i.t >= 0.0 && i.t < distance && self.casts_shadow(i.object))
    }

    /// Fraction of `light`'s samples visible from `point`, in `[0, 1]`.
    pub fn intensity_at(&self, point: Tuple, light: &Light, jitter: &mut Sequence) -> f64 {
        let visible = light
            .sample_points(jitter)
            .filter(|&position| !self.is_shadowed(point, position))
            .count();
        visible as f64 / light.samples() as f64
    }

    /// A shape casts shadows only if it and all of its ancestors do.
    fn casts_shadow(&self, id: ShapeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if !self.shapes[c].casts_shadow {
                return false;
            }
            current = self.shapes.parent(c);
        }
        true
    }
}
