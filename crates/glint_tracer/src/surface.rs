//! Surface descriptions: how a point on an object reflects light.

use crate::{SceneError, SceneResult};
use glint_math::{Color, Vector3};

/// Reflection properties of an object's surface.
///
/// All four queries are pure functions of the surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Solid color with a white highlight.
    ShinyColor(Color),
    /// Grey body with a white highlight.
    ShinyWhite,
    /// Red body with a tighter white highlight.
    ShinyRed,
    /// Procedural green/yellow checkerboard over the x/z plane.
    Checker(Checker),
}

impl Surface {
    /// Diffuse color at `pos`.
    pub fn diffuse(&self, pos: Vector3) -> Color {
        match self {
            Surface::ShinyColor(color) => *color,
            Surface::ShinyWhite => Color::GREY,
            Surface::ShinyRed => Color::RED,
            Surface::Checker(checker) => {
                if checker.selected(pos) {
                    Color::GREEN
                } else {
                    Color::YELLOW
                }
            }
        }
    }

    /// Specular highlight color at `pos`.
    pub fn specular(&self, _pos: Vector3) -> Color {
        Color::WHITE
    }

    /// Mirror reflectivity at `pos`, in [0, 1].
    pub fn reflect(&self, pos: Vector3) -> f64 {
        match self {
            Surface::ShinyColor(_) | Surface::ShinyWhite | Surface::ShinyRed => 0.3,
            Surface::Checker(checker) => {
                if checker.selected(pos) {
                    1.0
                } else {
                    0.9
                }
            }
        }
    }

    /// Specular exponent. Larger values give smaller highlights.
    pub fn roughness(&self) -> f64 {
        match self {
            Surface::ShinyColor(_) | Surface::ShinyWhite => 10.0,
            Surface::ShinyRed => 50.0,
            Surface::Checker(_) => 150.0,
        }
    }
}

/// Which predicate selects the green cells of a [`Checker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckerMode {
    /// Checkerboard test alone.
    #[default]
    Checker,
    /// Checkerboard AND inside the radial cutoff.
    Mixed,
}

/// Parameters of the procedural checkerboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checker {
    cell_size: f64,
    cutoff: f64,
    mode: CheckerMode,
}

impl Checker {
    pub const DEFAULT_CELL_SIZE: f64 = 10.0;
    pub const DEFAULT_CUTOFF: f64 = 700.0;

    /// Create a checkerboard with square cells of `cell_size` world units.
    pub fn new(cell_size: f64) -> SceneResult<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SceneError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            cutoff: Self::DEFAULT_CUTOFF,
            mode: CheckerMode::Checker,
        })
    }

    /// Restrict the selected cells to within `radius` of the y axis.
    pub fn with_cutoff(mut self, radius: f64) -> SceneResult<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(SceneError::InvalidCutoff(radius));
        }
        self.cutoff = radius;
        self.mode = CheckerMode::Mixed;
        Ok(self)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn mode(&self) -> CheckerMode {
        self.mode
    }

    /// True on odd cells of the x/z grid.
    pub fn checker(&self, pos: Vector3) -> bool {
        let cell = (pos.z / self.cell_size).floor() + (pos.x / self.cell_size).floor();
        cell % 2.0 != 0.0
    }

    /// True strictly inside the radial cutoff around the y axis.
    pub fn circle(&self, pos: Vector3) -> bool {
        (pos.x * pos.x + pos.z * pos.z).sqrt() < self.cutoff
    }

    pub fn selected(&self, pos: Vector3) -> bool {
        match self.mode {
            CheckerMode::Checker => self.checker(pos),
            CheckerMode::Mixed => self.checker(pos) && self.circle(pos),
        }
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            cutoff: Self::DEFAULT_CUTOFF,
            mode: CheckerMode::Checker,
        }
    }
}
