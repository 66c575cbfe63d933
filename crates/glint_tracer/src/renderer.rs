//! Pixel loop: primary rays, display conversion, and output surfaces.

use crate::bucket::render_parallel;
use crate::{RayTracer, RenderConfig, Scene};
use glint_math::{Camera, Ray, Rgb8, VectorExt};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing rendered images.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot save an image with no pixels ({0}x{1})")]
    EmptyImage(u32, u32),
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for rendered pixels.
pub trait PixelSink {
    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb8);
}

/// Primary ray through pixel (x, y) of a `width` x `height` view.
pub fn primary_ray(camera: &Camera, x: u32, y: u32, width: u32, height: u32) -> Ray {
    let (w, h) = (width as f64, height as f64);
    let recenter_x = (x as f64 - w / 2.0) / 2.0 / w;
    let recenter_y = -(y as f64 - h / 2.0) / 2.0 / h;
    let direction = (camera.forward + recenter_x * camera.right + recenter_y * camera.up).unit();
    Ray::new(camera.position, direction)
}

/// Render the scene into `sink`, one pixel at a time in row-major order.
pub fn render(tracer: &mut RayTracer, scene: &Scene, sink: &mut dyn PixelSink, width: u32, height: u32) {
    let camera = scene.camera();
    for y in 0..height {
        for x in 0..width {
            let ray = primary_ray(camera, x, y, width, height);
            let color = tracer.trace_ray(&ray, scene, 0);
            sink.put_pixel(x, y, color.to_drawing_color());
        }
    }
}

/// Render the scene to a new image using the given settings.
///
/// The tracer keeps its cache between calls, so rendering several frames with
/// one tracer reuses rays that repeat across frames.
pub fn render_image(tracer: &mut RayTracer, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = std::time::Instant::now();
    let mut image = ImageBuffer::new(config.width, config.height);

    if config.parallel {
        render_parallel(tracer, scene, &mut image, config.bucket_size);
    } else {
        render(tracer, scene, &mut image, config.width, config.height);
    }

    let stats = tracer.stats();
    log::info!(
        "Rendered {}x{} in {:?} (rayCacheSize: {}, reused: {})",
        config.width,
        config.height,
        start.elapsed(),
        stats.cache_size,
        stats.reused
    );
    image
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb8::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Rgb8) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Raw RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OutputError::EmptyImage(self.width, self.height));
        }
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSink for ImageBuffer {
    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb8) {
        self.set(x, y, color);
    }
}
