//! Phong surface materials.

use crate::{colors, Color, Light, Pattern, Sequence, ShapeArena, ShapeId};
use lumen_math::{ApproxEq, Tuple, TupleExt};

/// Surface description used by the Phong lighting model.
///
/// Coefficients are conventionally in `[0, 1]` except `shininess`
/// (roughly 10 for very large highlights to 200+ for very small ones) and
/// `refractive_index` (1.0 for vacuum, 1.5 for glass).
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Overrides `color` when set
    pub pattern: Option<Pattern>,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: colors::WHITE,
            pattern: None,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Solid surface color, used when no pattern is set.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Unlit color of `object` at a world-space point.
    pub fn surface_color(&self, shapes: &ShapeArena, object: ShapeId, point: Tuple) -> Color {
        match &self.pattern {
            Some(pattern) => pattern.pattern_at_shape(shapes, object, point),
            None => self.color,
        }
    }

    /// Phong shading of one light, averaged over the light's samples.
    ///
    /// `surface` is the unlit color at `point` (see [`Material::surface_color`]),
    /// `intensity` the fraction of the light that reaches the point. Ambient
    /// light is always added; diffuse and specular are scaled by `intensity`.
    #[allow(clippy::too_many_arguments)]
    pub fn lighting(
        &self,
        surface: Color,
        light: &Light,
        point: Tuple,
        eyev: Tuple,
        normalv: Tuple,
        intensity: f64,
        jitter: &mut Sequence,
    ) -> Color {
        let effective = surface * light.intensity;
        let ambient = effective * self.ambient;

        if intensity.approx_eq(&0.0) {
            return ambient;
        }

        let mut sum = Color::ZERO;
        for position in light.sample_points(jitter) {
            let lightv = (position - point).normalized();
            let light_dot_normal = lightv.dot(normalv);
            if light_dot_normal <= 0.0 {
                // Light is on the other side of the surface
                continue;
            }

            sum += effective * self.diffuse * light_dot_normal;

            let reflectv = (-lightv).reflect(normalv);
            let reflect_dot_eye = reflectv.dot(eyev);
            if reflect_dot_eye > 0.0 {
                let factor = reflect_dot_eye.powf(self.shininess);
                sum += light.intensity * self.specular * factor;
            }
        }

        ambient + sum / light.samples() as f64 * intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color, Shape};
    use lumen_math::{point, vector};

    fn lit(m: &Material, light: &Light, eyev: Tuple, normalv: Tuple, intensity: f64) -> Color {
        let mut jitter = light.jitter();
        m.lighting(m.color, light, point(0.0, 0.0, 0.0), eyev, normalv, intensity, &mut jitter)
    }

    #[test]
    fn test_default_material() {
        let m = Material::default();
        assert_eq!(m.color, color(1.0, 1.0, 1.0));
        assert_eq!(m.ambient, 0.1);
        assert_eq!(m.diffuse, 0.9);
        assert_eq!(m.specular, 0.9);
        assert_eq!(m.shininess, 200.0);
        assert_eq!(m.reflective, 0.0);
        assert_eq!(m.transparency, 0.0);
        assert_eq!(m.refractive_index, 1.0);
        assert!(m.pattern.is_none());
    }

    #[test]
    fn test_eye_between_light_and_surface() {
        let m = Material::default();
        let light = Light::point(point(0.0, 0.0, -10.0), colors::WHITE);
        let c = lit(&m, &light, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), 1.0);
        assert!(c.approx_eq(&color(1.9, 1.9, 1.9)));
    }

    #[test]
    fn test_eye_offset_45_degrees() {
        let m = Material::default();
        let k = 2.0_f64.sqrt() / 2.0;
        let light = Light::point(point(0.0, 0.0, -10.0), colors::WHITE);
        let c = lit(&m, &light, vector(0.0, k, -k), vector(0.0, 0.0, -1.0), 1.0);
        assert!(c.approx_eq(&color(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_light_offset_45_degrees() {
        let m = Material::default();
        let light = Light::point(point(0.0, 10.0, -10.0), colors::WHITE);
        let c = lit(&m, &light, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), 1.0);
        assert!((c - color(0.7364, 0.7364, 0.7364)).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_eye_in_reflection_path() {
        let m = Material::default();
        let k = 2.0_f64.sqrt() / 2.0;
        let light = Light::point(point(0.0, 10.0, -10.0), colors::WHITE);
        let c = lit(&m, &light, vector(0.0, -k, -k), vector(0.0, 0.0, -1.0), 1.0);
        assert!((c - color(1.6364, 1.6364, 1.6364)).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_light_behind_surface() {
        let m = Material::default();
        let light = Light::point(point(0.0, 0.0, 10.0), colors::WHITE);
        let c = lit(&m, &light, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), 1.0);
        assert!(c.approx_eq(&color(0.1, 0.1, 0.1)));
    }

    #[test]
    fn test_surface_in_shadow() {
        let m = Material::default();
        let light = Light::point(point(0.0, 0.0, -10.0), colors::WHITE);
        let c = lit(&m, &light, vector(0.0, 0.0, -1.0), vector(0.0, 0.0, -1.0), 0.0);
        assert!(c.approx_eq(&color(0.1, 0.1, 0.1)));
    }

    #[test]
    fn test_lighting_uses_light_intensity_fraction() {
        let mut shapes = ShapeArena::new();
        let s = shapes.add(Shape::sphere());
        let mut m = Material::default();
        m.ambient = 0.1;
        m.diffuse = 0.9;
        m.specular = 0.0;
        m.color = color(1.0, 1.0, 1.0);

        let light = Light::point(point(0.0, 0.0, -10.0), colors::WHITE);
        let pt = point(0.0, 0.0, -1.0);
        let eyev = vector(0.0, 0.0, -1.0);
        let normalv = vector(0.0, 0.0, -1.0);
        let cases = [(1.0, 1.0), (0.5, 0.55), (0.0, 0.1)];
        for (intensity, expected) in cases {
            let mut jitter = light.jitter();
            let surface = m.surface_color(&shapes, s, pt);
            let c = m.lighting(surface, &light, pt, eyev, normalv, intensity, &mut jitter);
            assert!(c.approx_eq(&color(expected, expected, expected)), "{intensity}");
        }
    }

    #[test]
    fn test_lighting_samples_area_light() {
        let mut shapes = ShapeArena::new();
        let s = shapes.add(Shape::sphere());
        let light = Light::area(
            point(-0.5, -0.5, -5.0),
            vector(1.0, 0.0, 0.0),
            2,
            vector(0.0, 1.0, 0.0),
            2,
            colors::WHITE,
        );
        let mut m = Material::default();
        m.ambient = 0.1;
        m.diffuse = 0.9;
        m.specular = 0.0;
        m.color = colors::WHITE;
        let eye = point(0.0, 0.0, -5.0);

        let cases = [
            (point(0.0, 0.0, -1.0), 0.9965),
            (point(0.0, 0.7071, -0.7071), 0.6232),
        ];
        for (pt, expected) in cases {
            let eyev = (eye - pt).normalized();
            let normalv = vector(pt.x, pt.y, pt.z);
            let mut jitter = light.jitter();
            let surface = m.surface_color(&shapes, s, pt);
            let c = m.lighting(surface, &light, pt, eyev, normalv, 1.0, &mut jitter);
            assert!((c - color(expected, expected, expected)).abs().max_element() < 1e-4);
        }
    }

    #[test]
    fn test_lighting_with_pattern() {
        let mut shapes = ShapeArena::new();
        let s = shapes.add(Shape::sphere());
        let m = Material {
            ambient: 1.0,
            diffuse: 0.0,
            specular: 0.0,
            ..Material::default()
        }
        .with_pattern(Pattern::stripe(colors::WHITE, colors::BLACK));

        let light = Light::point(point(0.0, 0.0, -10.0), colors::WHITE);
        let eyev = vector(0.0, 0.0, -1.0);
        let normalv = vector(0.0, 0.0, -1.0);
        for (x, expected) in [(0.9, colors::WHITE), (1.1, colors::BLACK)] {
            let pt = point(x, 0.0, 0.0);
            let mut jitter = light.jitter();
            let surface = m.surface_color(&shapes, s, pt);
            let c = m.lighting(surface, &light, pt, eyev, normalv, 1.0, &mut jitter);
            assert_eq!(c, expected);
        }
    }
}
