//! Glint - recursive ray tracing for small scenes of spheres and planes.
//!
//! Direct illumination from point lights, hard shadows, and bounded-depth
//! mirror reflection. Every traced ray's color can be memoized in a cache
//! keyed by the exact ray value.

mod bucket;
mod config;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod surface;
mod thing;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use config::{ConfigError, ConfigResult, RenderConfig};
pub use plane::Plane;
pub use renderer::{primary_ray, render, render_image, ImageBuffer, OutputError, OutputResult, PixelSink};
pub use scene::{Light, Scene, SceneError, SceneResult};
pub use sphere::Sphere;
pub use surface::{Checker, CheckerMode, Surface};
pub use thing::{Intersection, Thing};
pub use tracer::{CacheStats, RayTracer, DEFAULT_MAX_DEPTH};

/// Re-export math types from glint_math
pub use glint_math::{Camera, Color, Ray, RayKey, Rgb8, Vector3, VectorExt};
