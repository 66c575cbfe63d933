// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod camera;
mod color;
mod ray;
mod vector;

pub use camera::Camera;
pub use color::{Color, Rgb8};
pub use ray::{Ray, RayKey};
pub use vector::{Vector3, VectorExt};
