//! Single-crane lift evaluation
//!
//! Derates a crane's rated capacity for the requested radius and height,
//! applies the envelope cutoff, and compares the result against the load.

use crate::capacity::derating::{DeratingConfig, DEFAULT_WARNING_MARGIN_PCT};
use crate::equipment::CraneEnvelope;
use crate::types::serde_quantity::{metres, tonnes};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// A requested lift: where the hook must be and what hangs from it.
///
/// Values are not validated here; callers reject negative input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftRequest {
    #[serde(with = "metres")]
    pub radius: Length,
    #[serde(with = "metres")]
    pub height: Length,
    #[serde(with = "tonnes")]
    pub load_weight: Mass,
}

impl LiftRequest {
    pub fn new(radius: Length, height: Length, load_weight: Mass) -> Self {
        Self {
            radius,
            height,
            load_weight,
        }
    }

    /// Shorthand for metric input: metres and tonnes
    pub fn metric(radius_m: f64, height_m: f64, load_t: f64) -> Self {
        Self::new(
            Length::new::<meter>(radius_m),
            Length::new::<meter>(height_m),
            Mass::new::<megagram>(load_t),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

/// Capacity available at a position, before any load is considered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeratedCapacity {
    pub available: Mass,
    pub radius_derate: f64,
    pub height_derate: f64,
    pub within_envelope: bool,
    pub warning_margin_pct: f64,
}

impl DeratedCapacity {
    /// Derate `envelope` at the given hook position.
    ///
    /// Derating always runs; the envelope cutoff is applied afterwards and
    /// zeroes the result when either limit is exceeded.
    pub fn at(
        config: &DeratingConfig,
        envelope: &CraneEnvelope,
        radius: Length,
        height: Length,
    ) -> Self {
        let radius_ratio = radius.get::<meter>() / envelope.max_radius().get::<meter>();
        let height_ratio = height.get::<meter>() / envelope.max_height().get::<meter>();

        let radius_derate = config.radius_factor(radius_ratio);
        let height_derate = config.height_factor(height_ratio);
        let derated_t = envelope.rated_capacity().get::<megagram>() * radius_derate * height_derate;

        let within_envelope = envelope.contains(radius, height);
        let available_t = if within_envelope { derated_t } else { 0.0 };

        Self {
            available: Mass::new::<megagram>(available_t),
            radius_derate,
            height_derate,
            within_envelope,
            warning_margin_pct: config.warning_margin_pct,
        }
    }

    /// Verdict for a given load
    pub fn against(&self, load_weight: Mass) -> CapacityResult {
        let available_t = self.available.get::<megagram>();
        let load_t = load_weight.get::<megagram>();

        // strict: equal capacity and load leaves no margin
        let is_safe = available_t > load_t;
        let safety_margin_pct = if available_t == 0.0 {
            0.0
        } else {
            (available_t - load_t) / available_t * 100.0
        };

        CapacityResult {
            available_capacity: self.available,
            load_weight,
            is_safe,
            safety_margin_pct,
            within_envelope: self.within_envelope,
            radius_derate: self.radius_derate,
            height_derate: self.height_derate,
            warning_margin_pct: self.warning_margin_pct,
        }
    }
}

/// Result of evaluating one lift
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    #[serde(with = "tonnes")]
    pub available_capacity: Mass,
    #[serde(with = "tonnes")]
    pub load_weight: Mass,
    pub is_safe: bool,
    /// Headroom as a percentage of available capacity; 0 when nothing is available
    pub safety_margin_pct: f64,
    /// False when the hard radius/height cutoff zeroed the capacity
    pub within_envelope: bool,
    pub radius_derate: f64,
    pub height_derate: f64,
    /// Safe lifts with less margin than this are reported as `Warning`
    #[serde(default = "default_warning_margin")]
    pub warning_margin_pct: f64,
}

fn default_warning_margin() -> f64 {
    DEFAULT_WARNING_MARGIN_PCT
}

impl CapacityResult {
    /// Load as a percentage of available capacity
    pub fn utilization_pct(&self) -> Option<f64> {
        let available_t = self.available_capacity.get::<megagram>();
        if available_t == 0.0 {
            None
        } else {
            Some(self.load_weight.get::<megagram>() / available_t * 100.0)
        }
    }

    /// Pass / Warning / Fail using the margin the lift was evaluated with
    pub fn status(&self) -> CheckStatus {
        self.status_with_margin(self.warning_margin_pct)
    }

    pub fn status_with_margin(&self, warning_margin_pct: f64) -> CheckStatus {
        if !self.is_safe {
            CheckStatus::Fail
        } else if self.safety_margin_pct < warning_margin_pct {
            CheckStatus::Warning
        } else {
            CheckStatus::Pass
        }
    }

    /// One-line summary for logs and reports
    pub fn summary(&self) -> String {
        let verdict = match self.status() {
            CheckStatus::Pass => "SAFE",
            CheckStatus::Warning => "SAFE (low margin)",
            CheckStatus::Fail if !self.within_envelope => "OUT OF ENVELOPE",
            CheckStatus::Fail => "OVERLOADED",
        };
        format!(
            "{}: load {}, available {}, margin {:.1}%",
            verdict,
            DisplayMass(self.load_weight),
            DisplayMass(self.available_capacity),
            self.safety_margin_pct,
        )
    }
}

/// Evaluate a lift with the default derating table
pub fn evaluate_capacity(envelope: &CraneEnvelope, request: &LiftRequest) -> CapacityResult {
    evaluate_capacity_with(&DeratingConfig::default(), envelope, request)
}

/// Evaluate a lift with a configured derating table
pub fn evaluate_capacity_with(
    config: &DeratingConfig,
    envelope: &CraneEnvelope,
    request: &LiftRequest,
) -> CapacityResult {
    let result = DeratedCapacity::at(config, envelope, request.radius, request.height)
        .against(request.load_weight);

    tracing::debug!(
        radius_m = request.radius.get::<meter>(),
        height_m = request.height.get::<meter>(),
        load_t = request.load_weight.get::<megagram>(),
        available_t = result.available_capacity.get::<megagram>(),
        is_safe = result.is_safe,
        within_envelope = result.within_envelope,
        "lift evaluated"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn envelope() -> CraneEnvelope {
        CraneEnvelope::metric(100.0, 40.0, 58.0).unwrap()
    }

    #[test]
    fn test_half_radius_example() {
        let result = evaluate_capacity(&envelope(), &LiftRequest::metric(20.0, 0.0, 50.0));

        assert_relative_eq!(result.radius_derate, 0.353_553, epsilon = 1e-6);
        assert_relative_eq!(result.height_derate, 1.0);
        assert_relative_eq!(result.available_capacity.get::<megagram>(), 35.355_34, epsilon = 1e-4);
        assert!(!result.is_safe);
        assert!(result.within_envelope);
        assert!(result.safety_margin_pct < 0.0);
        assert_eq!(result.status(), CheckStatus::Fail);
    }

    #[test]
    fn test_radius_beyond_envelope_is_zero() {
        let result = evaluate_capacity(&envelope(), &LiftRequest::metric(45.0, 0.0, 1.0));

        assert_relative_eq!(result.available_capacity.get::<megagram>(), 0.0);
        assert!(!result.within_envelope);
        assert!(!result.is_safe);
        assert_relative_eq!(result.safety_margin_pct, 0.0);
        assert_eq!(result.utilization_pct(), None);
        assert!(result.summary().starts_with("OUT OF ENVELOPE"));
    }

    #[test]
    fn test_height_beyond_envelope_is_zero() {
        let result = evaluate_capacity(&envelope(), &LiftRequest::metric(5.0, 60.0, 1.0));
        assert_relative_eq!(result.available_capacity.get::<megagram>(), 0.0);
        assert!(!result.within_envelope);
    }

    #[test]
    fn test_envelope_edge_keeps_floor_capacity() {
        // radius == max is inside the envelope, the floor applies
        let result = evaluate_capacity(&envelope(), &LiftRequest::metric(40.0, 58.0, 0.0));
        assert!(result.within_envelope);
        assert_relative_eq!(
            result.available_capacity.get::<megagram>(),
            100.0 * 0.05 * 0.7,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_equal_load_is_not_safe() {
        let available = evaluate_capacity(&envelope(), &LiftRequest::metric(0.0, 0.0, 0.0))
            .available_capacity
            .get::<megagram>();
        assert_relative_eq!(available, 100.0);

        let result = evaluate_capacity(&envelope(), &LiftRequest::metric(0.0, 0.0, available));
        assert!(!result.is_safe);
        assert_relative_eq!(result.safety_margin_pct, 0.0);
    }

    #[test]
    fn test_margin_and_status_bands() {
        // full capacity at zero radius and height
        let pass = evaluate_capacity(&envelope(), &LiftRequest::metric(0.0, 0.0, 50.0));
        assert_relative_eq!(pass.safety_margin_pct, 50.0);
        assert_relative_eq!(pass.utilization_pct().unwrap(), 50.0);
        assert_eq!(pass.status(), CheckStatus::Pass);

        let warning = evaluate_capacity(&envelope(), &LiftRequest::metric(0.0, 0.0, 95.0));
        assert_relative_eq!(warning.safety_margin_pct, 5.0, epsilon = 1e-9);
        assert_eq!(warning.status(), CheckStatus::Warning);
        assert_eq!(warning.status_with_margin(2.0), CheckStatus::Pass);
        assert!(warning.summary().starts_with("SAFE (low margin)"));
    }

    #[test]
    fn test_configured_derating_table() {
        let config = DeratingConfig {
            radius_exponent: 1.0,
            height_slope: 0.0,
            ..Default::default()
        };
        let result =
            evaluate_capacity_with(&config, &envelope(), &LiftRequest::metric(20.0, 30.0, 10.0));
        assert_relative_eq!(result.available_capacity.get::<megagram>(), 50.0, epsilon = 1e-9);
        assert!(result.is_safe);
    }

    #[test]
    fn test_configured_warning_margin_from_toml() {
        let config = crate::config::PlannerConfig::from_toml_str(
            "[derating]\nwarning_margin_pct = 60.0\n",
        )
        .unwrap();
        let result = evaluate_capacity_with(
            &config.derating,
            &envelope(),
            &LiftRequest::metric(0.0, 0.0, 50.0),
        );

        assert_relative_eq!(result.safety_margin_pct, 50.0);
        assert_relative_eq!(result.warning_margin_pct, 60.0);
        assert_eq!(result.status(), CheckStatus::Warning);
        assert!(result.summary().starts_with("SAFE (low margin)"));

        // the default table still passes the same lift
        let default = evaluate_capacity(&envelope(), &LiftRequest::metric(0.0, 0.0, 50.0));
        assert_eq!(default.status(), CheckStatus::Pass);
    }

    #[test]
    fn test_request_deserializes_with_units() {
        let request: LiftRequest = serde_json::from_str(
            r#"{"radius": 20, "height": {"value": 1000, "unit": "cm"}, "load_weight": {"value": 5000, "unit": "kg"}}"#,
        )
        .unwrap();
        assert_relative_eq!(request.height.get::<meter>(), 10.0);
        assert_relative_eq!(request.load_weight.get::<megagram>(), 5.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_envelope() -> impl Strategy<Value = CraneEnvelope> {
            (1.0f64..1200.0, 5.0f64..100.0, 5.0f64..150.0)
                .prop_map(|(c, r, h)| CraneEnvelope::metric(c, r, h).unwrap())
        }

        proptest! {
            #[test]
            fn available_capacity_is_never_negative(
                envelope in arb_envelope(),
                radius in 0.0f64..200.0,
                height in 0.0f64..200.0,
                load in 0.0f64..2000.0,
            ) {
                let result = evaluate_capacity(&envelope, &LiftRequest::metric(radius, height, load));
                prop_assert!(result.available_capacity.get::<megagram>() >= 0.0);
            }

            #[test]
            fn capacity_does_not_increase_with_radius(
                envelope in arb_envelope(),
                a in 0.0f64..=1.0,
                b in 0.0f64..=1.0,
                height_ratio in 0.0f64..=1.0,
            ) {
                let (near, far) = if a <= b { (a, b) } else { (b, a) };
                let max_r = envelope.max_radius().get::<meter>();
                let height = height_ratio * envelope.max_height().get::<meter>();

                let at_near = evaluate_capacity(&envelope, &LiftRequest::metric(near * max_r, height, 0.0));
                let at_far = evaluate_capacity(&envelope, &LiftRequest::metric(far * max_r, height, 0.0));
                prop_assert!(
                    at_far.available_capacity.get::<megagram>()
                        <= at_near.available_capacity.get::<megagram>() + 1e-9
                );
            }

            #[test]
            fn exceeding_either_limit_zeroes_capacity(
                envelope in arb_envelope(),
                excess in 0.001f64..50.0,
                inside in 0.0f64..=1.0,
                radius_exceeded in any::<bool>(),
            ) {
                let (radius, height) = if radius_exceeded {
                    (envelope.max_radius().get::<meter>() + excess, inside * envelope.max_height().get::<meter>())
                } else {
                    (inside * envelope.max_radius().get::<meter>(), envelope.max_height().get::<meter>() + excess)
                };
                let result = evaluate_capacity(&envelope, &LiftRequest::metric(radius, height, 0.0));
                prop_assert_eq!(result.available_capacity.get::<megagram>(), 0.0);
                prop_assert!(!result.within_envelope);
            }

            #[test]
            fn safe_iff_capacity_strictly_exceeds_load(
                envelope in arb_envelope(),
                radius in 0.0f64..120.0,
                height in 0.0f64..160.0,
                load in 0.0f64..1500.0,
            ) {
                let result = evaluate_capacity(&envelope, &LiftRequest::metric(radius, height, load));
                let available = result.available_capacity.get::<megagram>();
                prop_assert_eq!(result.is_safe, available > result.load_weight.get::<megagram>());
            }
        }
    }
}
