use crate::Vector3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// Callers normalize the direction before constructing the ray; the tracer
/// never renormalizes it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vector3 {
        self.origin + t * self.direction
    }

    /// Exact value-based cache key for this ray.
    #[inline]
    pub fn key(&self) -> RayKey {
        RayKey::from(self)
    }
}

/// Hashable identity of a [`Ray`].
///
/// Two keys are equal exactly when the six coordinates compare equal as
/// floats. Nothing is rounded or quantized. Negative zero is folded into
/// positive zero so that `-0.0 == 0.0` holds for keys as it does for floats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RayKey([u64; 6]);

impl From<&Ray> for RayKey {
    fn from(ray: &Ray) -> Self {
        let bits = |v: f64| (v + 0.0).to_bits();
        let (o, d) = (ray.origin, ray.direction);
        RayKey([
            bits(o.x),
            bits(o.y),
            bits(o.z),
            bits(d.x),
            bits(d.y),
            bits(d.z),
        ])
    }
}
