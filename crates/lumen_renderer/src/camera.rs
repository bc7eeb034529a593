//! Pinhole camera.
//!
//! The canvas sits one unit in front of the eye along -z in camera space;
//! the view transform moves the world in front of it.

use crate::renderer::{self, ImageBuffer, RenderConfig};
use crate::{SceneResult, World};
use lumen_math::{point, Matrix, MatrixExt, Ray, TupleExt};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Image width in pixels
    pub hsize: u32,
    /// Image height in pixels
    pub vsize: u32,
    /// Horizontal or vertical field of view in radians, whichever is wider
    pub field_of_view: f64,
    transform: Matrix,
    inverse: Matrix,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    /// Camera at the origin looking down -z.
    pub fn new(hsize: u32, vsize: u32, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = f64::from(hsize) / f64::from(vsize);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            field_of_view,
            transform: Matrix::IDENTITY,
            inverse: Matrix::IDENTITY,
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / f64::from(hsize),
        }
    }

    /// Set the view transform. Fails if the matrix cannot be inverted.
    pub fn with_transform(mut self, transform: Matrix) -> SceneResult<Self> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Replace the view transform, leaving the camera unchanged on error.
    pub fn set_transform(&mut self, transform: Matrix) -> SceneResult<()> {
        self.inverse = transform.try_inverse()?;
        self.transform = transform;
        Ok(())
    }

    /// World-to-camera transform.
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// World-space size of one pixel on the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Ray from the eye through the center of pixel `(x, y)`.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let xoffset = (f64::from(x) + 0.5) * self.pixel_size;
        let yoffset = (f64::from(y) + 0.5) * self.pixel_size;

        // The camera looks toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * point(world_x, world_y, -1.0);
        let origin = self.inverse * point(0.0, 0.0, 0.0);
        let direction = (pixel - origin).normalized();

        Ray::new(origin, direction)
    }

    /// Render one pixel at a time on the calling thread.
    pub fn render(&self, world: &World) -> ImageBuffer {
        renderer::render(self, world, &RenderConfig::default())
    }

    /// Render in buckets on a pool of `jobs` threads.
    pub fn render_parallel(&self, world: &World, jobs: usize) -> ImageBuffer {
        let config = RenderConfig {
            jobs,
            ..RenderConfig::default()
        };
        renderer::render_parallel(self, world, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use lumen_math::{rotation_y, translation, vector, view_transform, ApproxEq};
    use std::f64::consts::PI;

    #[test]
    fn test_constructing_camera() {
        let c = Camera::new(160, 120, PI / 2.0);
        assert_eq!(c.hsize, 160);
        assert_eq!(c.vsize, 120);
        assert_eq!(c.field_of_view, PI / 2.0);
        assert_eq!(*c.transform(), Matrix::IDENTITY);
    }

    #[test]
    fn test_pixel_size() {
        assert!(Camera::new(200, 125, PI / 2.0).pixel_size().approx_eq(&0.01));
        assert!(Camera::new(125, 200, PI / 2.0).pixel_size().approx_eq(&0.01));
    }

    #[test]
    fn test_ray_through_center() {
        let c = Camera::new(201, 101, PI / 2.0);
        let r = c.ray_for_pixel(100, 50);
        assert!(r.origin.approx_eq(&point(0.0, 0.0, 0.0)));
        assert!(r.direction.approx_eq(&vector(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_ray_through_corner() {
        let c = Camera::new(201, 101, PI / 2.0);
        let r = c.ray_for_pixel(0, 0);
        assert!(r.origin.approx_eq(&point(0.0, 0.0, 0.0)));
        assert!(r.direction.approx_eq(&vector(0.66519, 0.33259, -0.66851)));
    }

    #[test]
    fn test_ray_with_transformed_camera() {
        let c = Camera::new(201, 101, PI / 2.0)
            .with_transform(rotation_y(PI / 4.0) * translation(0.0, -2.0, 5.0))
            .unwrap();
        let r = c.ray_for_pixel(100, 50);
        let k = 2.0_f64.sqrt() / 2.0;
        assert!(r.origin.approx_eq(&point(0.0, 2.0, -5.0)));
        assert!(r.direction.approx_eq(&vector(k, 0.0, -k)));
    }

    #[test]
    fn test_singular_view_transform_is_rejected() {
        let mut c = Camera::new(10, 10, PI / 2.0);
        assert!(c.set_transform(Matrix::ZERO).is_err());
        assert_eq!(*c.transform(), Matrix::IDENTITY);
    }

    fn default_scene_camera() -> Camera {
        let from = point(0.0, 0.0, -5.0);
        let to = point(0.0, 0.0, 0.0);
        let up = vector(0.0, 1.0, 0.0);
        Camera::new(11, 11, PI / 2.0)
            .with_transform(view_transform(from, to, up))
            .unwrap()
    }

    #[test]
    fn test_render_default_world() {
        let w = World::default_world();
        let image = default_scene_camera().render(&w);
        assert_eq!((image.width, image.height), (11, 11));
        let pixel = image.get(5, 5);
        assert!((pixel - color(0.38066, 0.47583, 0.2855)).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_parallel_render_matches_sequential() {
        let w = World::default_world();
        let c = default_scene_camera();
        let sequential = c.render(&w);
        for jobs in [1, 3] {
            assert_eq!(c.render_parallel(&w, jobs), sequential, "jobs = {jobs}");
        }
    }
}
