//! Route hazard scoring
//!
//! Height-restrictive hazards with a known clearance are re-classified
//! against the vehicle height; everything else keeps the detector's tag.
//! The score starts at 100 and loses a severity-weighted penalty per hazard.

use crate::route::hazard::{Hazard, Severity};
use crate::types::serde_quantity::metres;
use crate::types::*;
use serde::{Deserialize, Serialize};

pub const MAX_SAFETY_SCORE: u8 = 100;
/// Clearance headroom below which a passable hazard still needs care
pub const DEFAULT_CAUTION_BUFFER_M: f64 = 0.5;

/// Penalty per hazard for each severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPenalties {
    pub safe: u32,
    pub caution: u32,
    #[serde(rename = "unsafe")]
    pub unsafe_: u32,
}

impl Default for SeverityPenalties {
    fn default() -> Self {
        Self {
            safe: 0,
            caution: 10,
            unsafe_: 30,
        }
    }
}

impl SeverityPenalties {
    pub fn penalty(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Safe => self.safe,
            Severity::Caution => self.caution,
            Severity::Unsafe => self.unsafe_,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    #[serde(with = "metres")]
    pub caution_buffer: Length,
    pub penalties: SeverityPenalties,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            caution_buffer: Length::new::<meter>(DEFAULT_CAUTION_BUFFER_M),
            penalties: SeverityPenalties::default(),
        }
    }
}

impl ScoringConfig {
    /// Classify a clearance against vehicle height.
    ///
    /// Returns `None` when either value is not finite; the caller keeps the
    /// detector's severity.
    pub fn classify_clearance(&self, clearance: Length, vehicle_height: Length) -> Option<Severity> {
        if !clearance.get::<meter>().is_finite() || !vehicle_height.get::<meter>().is_finite() {
            return None;
        }
        let severity = if clearance < vehicle_height {
            Severity::Unsafe
        } else if clearance - vehicle_height < self.caution_buffer {
            Severity::Caution
        } else {
            Severity::Safe
        };
        Some(severity)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.caution_buffer.get::<meter>() >= 0.0) {
            return Err(format!(
                "caution_buffer {} must not be negative",
                DisplayLength(self.caution_buffer)
            ));
        }
        let p = &self.penalties;
        if !(p.safe <= p.caution && p.caution <= p.unsafe_) {
            return Err(format!(
                "penalties must be ordered safe <= caution <= unsafe, got {} / {} / {}",
                p.safe, p.caution, p.unsafe_
            ));
        }
        Ok(())
    }
}

/// Outcome of scoring a set of hazards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteScore {
    /// 0 (worst) to 100 (no penalties)
    pub safety_score: u8,
    pub overall_severity: Severity,
    /// Hazards with clearance-based severities applied, in input order
    pub hazards: Vec<Hazard>,
}

impl RouteScore {
    pub fn count(&self, severity: Severity) -> usize {
        self.hazards.iter().filter(|h| h.severity == severity).count()
    }

    pub fn is_passable(&self) -> bool {
        self.overall_severity != Severity::Unsafe
    }
}

/// Score hazards with the default configuration
pub fn score_route(hazards: &[Hazard], vehicle_height: Length) -> RouteScore {
    score_route_with(&ScoringConfig::default(), hazards, vehicle_height)
}

pub fn score_route_with(
    config: &ScoringConfig,
    hazards: &[Hazard],
    vehicle_height: Length,
) -> RouteScore {
    let hazards: Vec<Hazard> = hazards
        .iter()
        .map(|hazard| {
            let mut hazard = hazard.clone();
            if let Some(severity) = hazard
                .height_clearance()
                .and_then(|clearance| config.classify_clearance(clearance, vehicle_height))
            {
                hazard.severity = severity;
            }
            hazard
        })
        .collect();

    let overall_severity = hazards
        .iter()
        .map(|h| h.severity)
        .max()
        .unwrap_or(Severity::Safe);

    let total_penalty = hazards
        .iter()
        .fold(0u32, |acc, h| acc.saturating_add(config.penalties.penalty(h.severity)));
    let safety_score = u32::from(MAX_SAFETY_SCORE).saturating_sub(total_penalty) as u8;

    tracing::debug!(
        hazards = hazards.len(),
        vehicle_height_m = vehicle_height.get::<meter>(),
        safety_score,
        overall_severity = %overall_severity,
        "route scored"
    );

    RouteScore {
        safety_score,
        overall_severity,
        hazards,
    }
}
