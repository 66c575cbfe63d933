//! Sphere primitive for ray tracing.

use crate::{Intersection, SceneError, SceneResult, Surface, Thing};
use glint_math::{Ray, Vector3, VectorExt};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vector3,
    radius: f64,
    radius2: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vector3, radius: f64, surface: Surface) -> SceneResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            radius2: radius * radius,
            surface,
        })
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Thing for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Intersection<'a>> {
        let eo = self.center - ray.origin;
        let v = eo.dot(ray.direction);
        // Center is behind the ray origin
        if v < 0.0 {
            return None;
        }

        let disc = self.radius2 - (eo.dot(eo) - v * v);
        if disc < 0.0 {
            return None;
        }

        Intersection::new(self, *ray, v - disc.sqrt())
    }

    fn normal(&self, pos: Vector3) -> Vector3 {
        (pos - self.center).unit()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
