//! Scene description consumed by the tracer.
//!
//! A scene is built once by the caller and only read while rendering.

use crate::Thing;
use glint_math::{Camera, Color, Vector3};
use thiserror::Error;

/// Errors for malformed scene input, reported at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene has no lights")]
    NoLights,

    #[error("Invalid sphere radius: {0}")]
    InvalidRadius(f64),

    #[error("Plane normal must be finite and unit length")]
    InvalidNormal,

    #[error("Invalid checker cell size: {0}")]
    InvalidCellSize(f64),

    #[error("Invalid checker cutoff radius: {0}")]
    InvalidCutoff(f64),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector3,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vector3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Objects, lights, and the camera that views them.
#[derive(Debug)]
pub struct Scene {
    things: Vec<Box<dyn Thing>>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Create a new scene. At least one light is required; the object list
    /// may be empty.
    pub fn new(things: Vec<Box<dyn Thing>>, lights: Vec<Light>, camera: Camera) -> SceneResult<Self> {
        if lights.is_empty() {
            return Err(SceneError::NoLights);
        }
        log::debug!("Scene with {} objects and {} lights", things.len(), lights.len());
        Ok(Self {
            things,
            lights,
            camera,
        })
    }

    pub fn things(&self) -> &[Box<dyn Thing>] {
        &self.things
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}
