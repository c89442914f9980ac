use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::geometry::SplineBoundary;
use crate::tessellation::TubeProfile;

/// Default tube radius.
pub const DEFAULT_RADIUS: f64 = 5.0;

/// Default number of vertices per tube ring.
pub const DEFAULT_SIDE_COUNT: usize = 20;

/// Default spline resolution (intermediate samples per control-point segment).
pub const DEFAULT_RESOLUTION: NonZeroUsize = match NonZeroUsize::new(25) {
    Some(n) => n,
    None => unreachable!(),
};

/// Largest accepted spline resolution.
pub const MAX_RESOLUTION: usize = 10_000;

/// How control points are turned into a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterpolationMode {
    /// The path runs straight through the control points.
    #[default]
    Linear,
    /// The path is sampled from a cubic spline through the control points.
    CardinalSpline,
}

impl InterpolationMode {
    /// Maps a control-panel index to a mode.
    ///
    /// `0` is linear and `1` is cardinal spline; anything else falls back to
    /// linear.
    #[must_use]
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => Self::CardinalSpline,
            _ => Self::Linear,
        }
    }
}

/// How a closed linear path is joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LinearClosure {
    /// `[mid, p0, .., pN-1, mid]` where `mid` averages the first and last
    /// control points.
    #[default]
    Spur,
    /// `[p0, .., pN-1, p0]`.
    Ring,
}

/// RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);

    /// Creates a color from its components.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREEN
    }
}

/// Settings read by the curve pipeline on every regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveConfig {
    profile: TubeProfile,
    mode: InterpolationMode,
    closed: bool,
    resolution: NonZeroUsize,
    boundary: SplineBoundary,
    linear_closure: LinearClosure,
    color: Color,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            profile: TubeProfile::default(),
            mode: InterpolationMode::default(),
            closed: false,
            resolution: DEFAULT_RESOLUTION,
            boundary: SplineBoundary::default(),
            linear_closure: LinearClosure::default(),
            color: Color::default(),
        }
    }
}

impl CurveConfig {
    /// Returns the tube cross-section.
    #[must_use]
    pub fn profile(&self) -> TubeProfile {
        self.profile
    }

    /// Returns the tube radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.profile.radius()
    }

    /// Returns the number of vertices per tube ring.
    #[must_use]
    pub fn side_count(&self) -> usize {
        self.profile.side_count()
    }

    #[must_use]
    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the spline resolution.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution.get()
    }

    #[must_use]
    pub fn boundary(&self) -> SplineBoundary {
        self.boundary
    }

    #[must_use]
    pub fn linear_closure(&self) -> LinearClosure {
        self.linear_closure
    }

    /// Returns the color given to destinations without display properties.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Sets the tube radius.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRadius`] if `radius` is not positive and
    /// finite; the previous radius is kept.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        self.profile = TubeProfile::new(radius, self.profile.side_count())?;
        Ok(())
    }

    /// Sets the number of vertices per tube ring.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooFewSides`] below 3 sides; the previous value
    /// is kept.
    pub fn set_side_count(&mut self, side_count: usize) -> Result<()> {
        self.profile = TubeProfile::new(self.profile.radius(), side_count)?;
        Ok(())
    }

    /// Sets the spline resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResolution`] for zero or anything above
    /// [`MAX_RESOLUTION`]; the previous value is kept.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<()> {
        self.resolution = NonZeroUsize::new(resolution)
            .filter(|r| r.get() <= MAX_RESOLUTION)
            .ok_or(ConfigError::InvalidResolution(resolution))?;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: InterpolationMode) {
        self.mode = mode;
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn set_boundary(&mut self, boundary: SplineBoundary) {
        self.boundary = boundary;
    }

    pub fn set_linear_closure(&mut self, closure: LinearClosure) {
        self.linear_closure = closure;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Returns the config with the given radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is rejected by [`Self::set_radius`].
    pub fn with_radius(mut self, radius: f64) -> Result<Self> {
        self.set_radius(radius)?;
        Ok(self)
    }

    /// Returns the config with the given side count.
    ///
    /// # Errors
    ///
    /// Returns an error if `side_count` is rejected by [`Self::set_side_count`].
    pub fn with_side_count(mut self, side_count: usize) -> Result<Self> {
        self.set_side_count(side_count)?;
        Ok(self)
    }

    /// Returns the config with the given spline resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is rejected by [`Self::set_resolution`].
    pub fn with_resolution(mut self, resolution: usize) -> Result<Self> {
        self.set_resolution(resolution)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    #[must_use]
    pub fn with_boundary(mut self, boundary: SplineBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    #[must_use]
    pub fn with_linear_closure(mut self, closure: LinearClosure) -> Self {
        self.linear_closure = closure;
        self
    }
}
