//! Thing trait and Intersection for ray-object queries.

use crate::Surface;
use glint_math::{Ray, Vector3};
use std::fmt;

/// Record of a ray hitting one object.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// The object that was hit
    pub thing: &'a dyn Thing,
    /// The ray that hit it
    pub ray: Ray,
    /// Distance along the ray, always finite and strictly positive
    pub distance: f64,
}

impl<'a> Intersection<'a> {
    /// Build an intersection, or `None` unless `distance` is finite and positive.
    ///
    /// A zero distance counts as a miss: a ray starting exactly on a surface
    /// does not hit that surface.
    pub fn new(thing: &'a dyn Thing, ray: Ray, distance: f64) -> Option<Self> {
        if distance > 0.0 && distance.is_finite() {
            Some(Self {
                thing,
                ray,
                distance,
            })
        } else {
            None
        }
    }

    /// World-space hit point.
    #[inline]
    pub fn position(&self) -> Vector3 {
        self.ray.at(self.distance)
    }
}

/// A geometric object that can be hit by rays.
pub trait Thing: fmt::Debug + Send + Sync {
    /// Nearest hit of `ray` against this object, if any.
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Intersection<'a>>;

    /// Outward surface normal at `pos`, unit length.
    fn normal(&self, pos: Vector3) -> Vector3;

    /// Surface description used for shading.
    fn surface(&self) -> &Surface;
}
