//! Capacity derating for working radius and lift height.
//!
//! Capacity falls off faster than linearly as reach approaches the envelope
//! limit, so the radius factor is a power curve with a floor. Height has a
//! shallower, linear effect that alone can never zero capacity.
//!
//! The constants below are not taken from any manufacturer chart or standard;
//! they are configuration and should be reviewed per crane family.

use serde::{Deserialize, Serialize};

/// Smallest radius factor; keeps the curve positive near the envelope edge
pub const DEFAULT_RADIUS_FLOOR: f64 = 0.05;
pub const DEFAULT_RADIUS_EXPONENT: f64 = 1.5;
/// Height alone removes at most 30% of capacity
pub const DEFAULT_HEIGHT_FLOOR: f64 = 0.7;
pub const DEFAULT_HEIGHT_SLOPE: f64 = 0.3;
/// Margin below which a safe lift is still flagged
pub const DEFAULT_WARNING_MARGIN_PCT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeratingConfig {
    pub radius_floor: f64,
    pub radius_exponent: f64,
    pub height_floor: f64,
    pub height_slope: f64,
    pub warning_margin_pct: f64,
}

impl Default for DeratingConfig {
    fn default() -> Self {
        Self {
            radius_floor: DEFAULT_RADIUS_FLOOR,
            radius_exponent: DEFAULT_RADIUS_EXPONENT,
            height_floor: DEFAULT_HEIGHT_FLOOR,
            height_slope: DEFAULT_HEIGHT_SLOPE,
            warning_margin_pct: DEFAULT_WARNING_MARGIN_PCT,
        }
    }
}

impl DeratingConfig {
    /// Radius factor, `max(floor, (1 - ratio)^exponent)`
    ///
    /// For ratios above 1 the power of a negative base is NaN, and
    /// `f64::max` then returns the floor.
    pub fn radius_factor(&self, radius_ratio: f64) -> f64 {
        (1.0 - radius_ratio)
            .powf(self.radius_exponent)
            .max(self.radius_floor)
    }

    /// Height factor, `max(floor, 1 - ratio * slope)`
    pub fn height_factor(&self, height_ratio: f64) -> f64 {
        (1.0 - height_ratio * self.height_slope).max(self.height_floor)
    }

    /// Check the table is usable; returns a description of the first problem
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.radius_floor) {
            return Err(format!("radius_floor {} outside [0, 1]", self.radius_floor));
        }
        if !(self.radius_exponent > 0.0) {
            return Err(format!("radius_exponent {} must be positive", self.radius_exponent));
        }
        if !(0.0..=1.0).contains(&self.height_floor) {
            return Err(format!("height_floor {} outside [0, 1]", self.height_floor));
        }
        if !(0.0..=1.0).contains(&self.height_slope) {
            return Err(format!("height_slope {} outside [0, 1]", self.height_slope));
        }
        if !(self.warning_margin_pct >= 0.0) {
            return Err(format!(
                "warning_margin_pct {} must not be negative",
                self.warning_margin_pct
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_radius_factor_curve() {
        let config = DeratingConfig::default();
        assert_relative_eq!(config.radius_factor(0.0), 1.0);
        assert_relative_eq!(config.radius_factor(0.5), 0.353_553, epsilon = 1e-6);
        // (0.1)^1.5 = 0.0316 is under the floor
        assert_relative_eq!(config.radius_factor(0.9), 0.05);
        assert_relative_eq!(config.radius_factor(1.0), 0.05);
        assert_relative_eq!(config.radius_factor(1.2), 0.05);
    }

    #[test]
    fn test_height_factor_floor() {
        let config = DeratingConfig::default();
        assert_relative_eq!(config.height_factor(0.0), 1.0);
        assert_relative_eq!(config.height_factor(0.5), 0.85);
        assert_relative_eq!(config.height_factor(1.0), 0.7);
        assert_relative_eq!(config.height_factor(3.0), 0.7);
    }

    #[test]
    fn test_nan_ratio_falls_to_floor() {
        let config = DeratingConfig::default();
        assert_relative_eq!(config.radius_factor(f64::NAN), 0.05);
        assert_relative_eq!(config.height_factor(f64::NAN), 0.7);
    }

    #[test]
    fn test_validate() {
        assert!(DeratingConfig::default().validate().is_ok());

        let bad_floor = DeratingConfig { radius_floor: 1.5, ..Default::default() };
        assert!(bad_floor.validate().is_err());

        let bad_exponent = DeratingConfig { radius_exponent: 0.0, ..Default::default() };
        assert!(bad_exponent.validate().is_err());

        let bad_margin = DeratingConfig { warning_margin_pct: -1.0, ..Default::default() };
        assert!(bad_margin.validate().is_err());
    }
}
