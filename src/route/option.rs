use crate::route::hazard::{Hazard, Severity};
use crate::route::path::RoutePath;
use crate::route::scoring::{score_route_with, ScoringConfig};
use crate::types::serde_quantity::metres;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate route for an abnormal load, scored for a given vehicle height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub name: String,
    pub path: RoutePath,
    #[serde(with = "metres")]
    pub vehicle_height: Length,
    /// Encounter order along the route
    pub hazards: Vec<Hazard>,
    pub safety_score: u8,
    pub overall_severity: Severity,
}

impl RouteOption {
    /// Order hazards by chainage, score them, and build the option.
    ///
    /// Hazards without a chainage keep their relative order after the
    /// located ones.
    pub fn assess(
        name: impl Into<String>,
        path: RoutePath,
        mut hazards: Vec<Hazard>,
        vehicle_height: Length,
        config: &ScoringConfig,
    ) -> Self {
        // stable sort keeps detector order for ties and unlocated hazards
        hazards.sort_by(|a, b| match (a.chainage, b.chainage) {
            (Some(x), Some(y)) => x.get::<meter>().total_cmp(&y.get::<meter>()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let score = score_route_with(config, &hazards, vehicle_height);

        Self {
            name: name.into(),
            path,
            vehicle_height,
            hazards: score.hazards,
            safety_score: score.safety_score,
            overall_severity: score.overall_severity,
        }
    }

    pub fn distance(&self) -> Length {
        self.path.length()
    }

    /// First hazard that stops the vehicle, if any
    pub fn first_blocking_hazard(&self) -> Option<&Hazard> {
        self.hazards.iter().find(|h| h.severity == Severity::Unsafe)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: score {}/100, {}, {} hazard(s), {}",
            self.name,
            self.safety_score,
            self.overall_severity,
            self.hazards.len(),
            DisplayLength(self.distance()),
        )
    }
}

/// Order route options safest first: lower worst severity, then higher
/// score, then shorter distance.
pub fn rank_routes(options: &mut [RouteOption]) {
    options.sort_by(|a, b| {
        a.overall_severity
            .cmp(&b.overall_severity)
            .then_with(|| b.safety_score.cmp(&a.safety_score))
            .then_with(|| {
                a.distance()
                    .get::<meter>()
                    .total_cmp(&b.distance().get::<meter>())
            })
    });
}
