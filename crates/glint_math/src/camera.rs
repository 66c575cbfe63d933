use crate::{Vector3, VectorExt};

/// Camera basis scale factor. Controls the field of view.
pub const ZOOM: f64 = 1.5;

/// World "down", used to derive the camera's right vector.
const DOWN: Vector3 = Vector3::new(0.0, -1.0, 0.0);

/// Pinhole camera described by a position and a view basis.
///
/// `right` and `up` are unit vectors scaled by [`ZOOM`], so the basis is
/// orthogonal but not orthonormal. The camera is never mutated; a new pose
/// means a new `Camera`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3,
    pub forward: Vector3,
    pub right: Vector3,
    pub up: Vector3,
}

impl Camera {
    /// Create a camera at `position` looking at `look_at`.
    ///
    /// # Panics
    ///
    /// Panics if `look_at == position` or the view direction is vertical,
    /// since neither yields a usable basis.
    pub fn new(position: Vector3, look_at: Vector3) -> Self {
        let forward = (look_at - position).unit();
        let right = ZOOM * forward.cross(DOWN).unit();
        let up = ZOOM * forward.cross(right).unit();
        Self {
            position,
            forward,
            right,
            up,
        }
    }
}
