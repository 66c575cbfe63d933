//! Camera schedule orbiting the scene's vertical axis.

use std::f64::consts::PI;

/// Slider-style orbit state: an integer rotation in `[min, max)` and a zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub rotation: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub zoom: f64,
}

impl Orbit {
    pub fn new(rotation: u32, max: u32, step: u32, zoom: f64) -> Self {
        let max = max.max(1);
        Self {
            rotation: rotation % max,
            min: 0,
            max,
            step,
            zoom,
        }
    }

    /// Orbit angle in radians.
    pub fn angle(&self) -> f64 {
        self.rotation as f64 / self.max as f64 * PI * 2.0
    }

    /// Camera (x, z) on the orbit circle.
    pub fn position(&self) -> (f64, f64) {
        let radius = self.zoom * 5.0;
        (self.angle().cos() * radius, self.angle().sin() * radius)
    }

    /// Move to the next frame. Returns true when the orbit wrapped around.
    pub fn advance(&mut self) -> bool {
        self.rotation = self.rotation.saturating_add(self.step);
        if self.rotation >= self.max {
            self.rotation = self.min;
            true
        } else {
            false
        }
    }
}
