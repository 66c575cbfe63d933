//! 3-vector type and the checked normalization used for ray directions.

/// 3-component vector in world space.
///
/// Double precision throughout: cache keys compare exact bit patterns, so the
/// whole pipeline works at one precision.
pub type Vector3 = glam::DVec3;

/// Extra vector operations not provided by glam.
pub trait VectorExt {
    /// Normalize to unit length.
    ///
    /// # Panics
    ///
    /// Panics if the vector has zero or non-finite length. A degenerate
    /// direction would otherwise turn every downstream color into NaN.
    fn unit(self) -> Vector3;
}

impl VectorExt for Vector3 {
    #[inline]
    fn unit(self) -> Vector3 {
        let mag = self.length();
        assert!(
            mag > 0.0 && mag.is_finite(),
            "cannot normalize vector {:?} with length {}",
            self,
            mag
        );
        self / mag
    }
}
