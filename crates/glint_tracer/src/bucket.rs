//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are traced independently and
//! in parallel using rayon. Each bucket gets its own cache shard that reads
//! through to the owning tracer's cache; shards are merged back into the owner
//! once every bucket is done.

use crate::renderer::primary_ray;
use crate::{CacheStats, ImageBuffer, RayTracer, Scene};
use glint_math::Rgb8;
use rayon::prelude::*;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in row-major bucket order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Split a `width` x `height` image into row-major buckets of at most
/// `bucket_size` pixels on a side.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Render a single bucket of a `width` x `height` image.
///
/// When `parent` is given, cache lookups fall back to its entries.
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    tracer: &mut RayTracer,
    parent: Option<&RayTracer>,
    scene: &Scene,
    width: u32,
    height: u32,
) -> Vec<Rgb8> {
    let camera = scene.camera();
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let ray = primary_ray(camera, bucket.x + local_x, bucket.y + local_y, width, height);
            let color = match parent {
                Some(parent) => tracer.trace_ray_with_parent(parent, &ray, scene, 0),
                None => tracer.trace_ray(&ray, scene, 0),
            };
            pixels.push(color.to_drawing_color());
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Rgb8>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Rgb8>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into place.
    pub fn write_to(&self, image: &mut ImageBuffer) {
        let mut pixels = self.pixels.iter();
        for local_y in 0..self.bucket.height {
            for local_x in 0..self.bucket.width {
                if let Some(p) = pixels.next() {
                    image.set(self.bucket.x + local_x, self.bucket.y + local_y, *p);
                }
            }
        }
    }
}

/// Render every bucket of `image` in parallel.
///
/// Every bucket sees the entries the tracer held before this call, but not the
/// ones other buckets add during it, so the reuse count can be lower than a
/// sequential render of the same frame. Colors are identical.
pub fn render_parallel(tracer: &mut RayTracer, scene: &Scene, image: &mut ImageBuffer, bucket_size: u32) {
    let (width, height) = (image.width(), image.height());
    let buckets = generate_buckets(width, height, bucket_size);
    let owner: &RayTracer = tracer;

    let results: Vec<(BucketResult, RayTracer)> = buckets
        .into_par_iter()
        .map(|bucket| {
            let mut shard = owner.shard();
            let pixels = render_bucket(&bucket, &mut shard, Some(owner), scene, width, height);
            log::debug!("Bucket {} done: {:?}", bucket.index, shard.stats());
            (BucketResult::new(bucket, pixels), shard)
        })
        .collect();

    let mut shard_stats = CacheStats::default();
    for (result, shard) in results {
        result.write_to(image);
        shard_stats += shard.stats();
        tracer.merge(shard);
    }
    log::debug!("Merged {:?} from cache shards", shard_stats);
}
