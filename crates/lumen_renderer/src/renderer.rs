//! Render loop and output buffer.
//!
//! Implements Whitted-style ray tracing with:
//! - One primary ray per pixel through its center
//! - Recursive reflection and refraction bounded by `max_depth`
//! - Sequential or bucketed parallel execution

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::bucket::{self, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Color, World, DEFAULT_MAX_DEPTH};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum reflection/refraction depth
    pub max_depth: usize,
    /// Worker threads for parallel rendering
    pub jobs: usize,
    /// Edge length of a square bucket in pixels
    pub bucket_size: u32,
    /// Log bucket completion while rendering
    pub report_progress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            jobs: std::thread::available_parallelism().map_or(1, |n| n.get()),
            bucket_size: DEFAULT_BUCKET_SIZE,
            report_progress: false,
        }
    }
}

/// Convert a linear color channel to a byte, clamping to `[0, 1]`.
#[inline]
pub fn channel_to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ]
}

/// Width × height grid of linear RGB colors, row-major from the top left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y). Writes outside the image are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.pixels[i] = color;
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Copy a row-major block of pixels with its top-left corner at `(x, y)`.
    pub(crate) fn blit(&mut self, x: u32, y: u32, width: u32, block: &[Color]) {
        for (row, line) in block.chunks(width as usize).enumerate() {
            let start = self.offset(x, y + row as u32);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Convert to an 8-bit image for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb(self.get(x, y)))
        })
    }
}

impl From<&image::RgbImage> for ImageBuffer {
    fn from(img: &image::RgbImage) -> Self {
        let mut buffer = ImageBuffer::new(img.width(), img.height());
        for (x, y, pixel) in img.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            let color = Color::new(f64::from(r), f64::from(g), f64::from(b)) / 255.0;
            buffer.set(x, y, color);
        }
        buffer
    }
}

/// Color seen through pixel `(x, y)`.
///
/// Each light's jitter sequence starts at the pixel's row-major index and
/// advances across every hit along the pixel's ray tree, so the result
/// depends only on the pixel and not on the order pixels are rendered.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let ray = camera.ray_for_pixel(x, y);
    let index = y as usize * camera.hsize as usize + x as usize;
    let mut jitters = world.jitters(index);
    world.color_at_with(&ray, config.max_depth, &mut jitters)
}

/// Render the entire scene on the calling thread.
pub fn render(camera: &Camera, world: &World, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.hsize, camera.vsize);

    for y in 0..camera.vsize {
        for x in 0..camera.hsize {
            image.set(x, y, render_pixel(camera, world, x, y, config));
        }
    }

    log::info!(
        "Rendered {}x{} in {:.2?}",
        camera.hsize,
        camera.vsize,
        start.elapsed()
    );
    image
}

/// Render the scene in buckets on a dedicated pool of `config.jobs` threads.
///
/// Falls back to rayon's global pool if the dedicated pool cannot be built.
pub fn render_parallel(camera: &Camera, world: &World, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let jobs = config.jobs.max(1);
    log::info!(
        "Rendering {}x{} with {} threads, bucket size {}, max depth {}",
        camera.hsize,
        camera.vsize,
        jobs,
        config.bucket_size,
        config.max_depth
    );

    let image = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(|| bucket::render_buckets(camera, world, config)),
        Err(err) => {
            log::warn!(
                "Could not build a {}-thread pool ({}), using the global pool",
                jobs,
                err
            );
            bucket::render_buckets(camera, world, config)
        }
    };

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
