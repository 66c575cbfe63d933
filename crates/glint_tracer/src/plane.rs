//! Infinite plane primitive.

use crate::{Intersection, SceneError, SceneResult, Surface, Thing};
use glint_math::{Ray, Vector3};

/// Tolerance on the length of a plane normal.
const NORMAL_EPSILON: f64 = 1e-9;

/// The plane `dot(normal, p) + offset = 0`, visible from the side `normal`
/// points to.
#[derive(Debug, Clone)]
pub struct Plane {
    normal: Vector3,
    offset: f64,
    surface: Surface,
}

impl Plane {
    /// Create a new plane. `normal` must be unit length.
    pub fn new(normal: Vector3, offset: f64, surface: Surface) -> SceneResult<Self> {
        if !normal.is_finite() || (normal.length() - 1.0).abs() > NORMAL_EPSILON || !offset.is_finite() {
            return Err(SceneError::InvalidNormal);
        }
        Ok(Self {
            normal,
            offset,
            surface,
        })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Thing for Plane {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Intersection<'a>> {
        let denom = self.normal.dot(ray.direction);
        // Moving away from the front face
        if denom > 0.0 {
            return None;
        }
        let distance = (self.normal.dot(ray.origin) + self.offset) / -denom;
        Intersection::new(self, *ray, distance)
    }

    fn normal(&self, _pos: Vector3) -> Vector3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Plane {
        Plane::new(Vector3::Y, 0.0, Surface::ShinyWhite).unwrap()
    }

    #[test]
    fn test_plane_hit() {
        let plane = ground();
        let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), -Vector3::Y);

        let isect = plane.intersect(&ray).expect("ray should hit the plane");
        assert_eq!(isect.distance, 5.0);
        assert_eq!(isect.position(), Vector3::ZERO);
    }

    #[test]
    fn test_plane_hit_with_offset() {
        // y = 2
        let plane = Plane::new(Vector3::Y, -2.0, Surface::ShinyWhite).unwrap();
        let ray = Ray::new(Vector3::new(1.0, 5.0, 1.0), -Vector3::Y);

        let isect = plane.intersect(&ray).unwrap();
        assert_eq!(isect.distance, 3.0);
    }

    #[test]
    fn test_plane_moving_away() {
        let plane = ground();
        let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::Y);

        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_parallel_ray() {
        let plane = ground();
        let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::X);

        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_origin() {
        let plane = ground();
        // Below the plane heading further down: the root is negative
        let ray = Ray::new(Vector3::new(0.0, -1.0, 0.0), -Vector3::Y);

        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_normal_is_constant() {
        let plane = ground();
        assert_eq!(plane.normal(Vector3::new(7.0, 0.0, -3.0)), Vector3::Y);
    }

    #[test]
    fn test_plane_rejects_bad_normal() {
        assert!(matches!(
            Plane::new(Vector3::ZERO, 0.0, Surface::ShinyWhite),
            Err(SceneError::InvalidNormal)
        ));
        assert!(matches!(
            Plane::new(Vector3::new(0.0, 2.0, 0.0), 0.0, Surface::ShinyWhite),
            Err(SceneError::InvalidNormal)
        ));
    }
}
