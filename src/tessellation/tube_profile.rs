#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_RADIUS, DEFAULT_SIDE_COUNT};
#[cfg(feature = "serde")]
use crate::error::CurveTubeError;
use crate::error::{ConfigError, Result};

/// Fewest sides a tube cross-section may have.
pub const MIN_SIDES: usize = 3;

/// Circular cross-section swept along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawTubeProfile")
)]
pub struct TubeProfile {
    radius: f64,
    side_count: usize,
}

impl Default for TubeProfile {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            side_count: DEFAULT_SIDE_COUNT,
        }
    }
}

/// Unvalidated profile as read from a serialized config.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTubeProfile {
    radius: f64,
    side_count: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTubeProfile> for TubeProfile {
    type Error = CurveTubeError;

    fn try_from(raw: RawTubeProfile) -> Result<Self> {
        Self::new(raw.radius, raw.side_count)
    }
}

impl TubeProfile {
    /// Creates a new tube profile.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive and finite, or if
    /// `side_count` is below [`MIN_SIDES`].
    pub fn new(radius: f64, side_count: usize) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius).into());
        }
        if side_count < MIN_SIDES {
            return Err(ConfigError::TooFewSides {
                min: MIN_SIDES,
                actual: side_count,
            }
            .into());
        }
        Ok(Self { radius, side_count })
    }

    /// Returns the tube radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the number of vertices per cross-section ring.
    #[must_use]
    pub fn side_count(&self) -> usize {
        self.side_count
    }

    /// Returns `(cos, sin)` of each ring vertex angle, starting at 0.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn ring_angles(&self) -> Vec<(f64, f64)> {
        let step = std::f64::consts::TAU / self.side_count as f64;
        (0..self.side_count)
            .map(|i| {
                let angle = step * i as f64;
                (angle.cos(), angle.sin())
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_with_valid_values() {
        let profile = TubeProfile::new(2.5, 8).unwrap();
        assert!((profile.radius() - 2.5).abs() < f64::EPSILON);
        assert_eq!(profile.side_count(), 8);
        assert_eq!(profile.ring_angles().len(), 8);
    }

    #[test]
    fn zero_radius_fails() {
        assert!(TubeProfile::new(0.0, 20).is_err());
    }

    #[test]
    fn negative_radius_fails() {
        assert!(TubeProfile::new(-1.0, 20).is_err());
    }

    #[test]
    fn nan_radius_fails() {
        assert!(TubeProfile::new(f64::NAN, 20).is_err());
    }

    #[test]
    fn two_sides_fail() {
        assert!(TubeProfile::new(1.0, 2).is_err());
    }

    #[test]
    fn ring_angles_are_unit_and_start_at_zero() {
        let angles = TubeProfile::new(1.0, 4).unwrap().ring_angles();
        assert!((angles[0].0 - 1.0).abs() < 1e-12);
        assert!(angles[0].1.abs() < 1e-12);
        for (c, s) in angles {
            assert!((c * c + s * s - 1.0).abs() < 1e-12);
        }
    }
}
