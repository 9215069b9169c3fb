use crate::capacity::derating::DeratingConfig;
use crate::capacity::lift_validation::{CapacityResult, DeratedCapacity};
use crate::equipment::crane::CraneEnvelope;
use crate::types::*;

/// A multi-crane lift with several cranes sharing one load.
///
/// Each crane's capacity is evaluated independently at its own hook position.
/// The load is then split in proportion to those capacities, which assumes a
/// rigid, evenly distributing spreader. Rigging-induced redistribution is not
/// modelled.
#[derive(Debug, Clone)]
pub struct MultiCraneLift {
    /// Cranes participating in the lift
    pub cranes: Vec<TandemCrane>,

    /// Total load being lifted
    pub total_load: Mass,
}

#[derive(Debug, Clone)]
pub struct TandemCrane {
    pub label: String,
    pub envelope: CraneEnvelope,
    pub radius: Length,
    pub height: Length,
}

impl MultiCraneLift {
    pub fn new(total_load: Mass) -> Self {
        Self {
            cranes: Vec::new(),
            total_load,
        }
    }

    /// Add a crane working at the given radius and height
    pub fn add_crane(
        &mut self,
        label: impl Into<String>,
        envelope: CraneEnvelope,
        radius: Length,
        height: Length,
    ) -> &mut Self {
        self.cranes.push(TandemCrane {
            label: label.into(),
            envelope,
            radius,
            height,
        });
        self
    }

    pub fn evaluate(&self) -> MultiCraneAnalysis {
        self.evaluate_with(&DeratingConfig::default())
    }

    pub fn evaluate_with(&self, config: &DeratingConfig) -> MultiCraneAnalysis {
        let derated: Vec<DeratedCapacity> = self
            .cranes
            .iter()
            .map(|c| DeratedCapacity::at(config, &c.envelope, c.radius, c.height))
            .collect();

        let total_capacity_t: f64 = derated.iter().map(|d| d.available.get::<megagram>()).sum();
        let total_load_t = self.total_load.get::<megagram>();

        let cranes = self
            .cranes
            .iter()
            .zip(&derated)
            .map(|(crane, capacity)| {
                let available_t = capacity.available.get::<megagram>();
                let share_fraction = if total_capacity_t > 0.0 {
                    available_t / total_capacity_t
                } else {
                    0.0
                };
                let load_share = Mass::new::<megagram>(share_fraction * total_load_t);
                let result = capacity.against(load_share);

                CraneShare {
                    label: crane.label.clone(),
                    share_fraction,
                    load_share,
                    utilization_pct: result.utilization_pct(),
                    result,
                }
            })
            .collect();

        let analysis = MultiCraneAnalysis {
            total_load: self.total_load,
            total_capacity: Mass::new::<megagram>(total_capacity_t),
            is_safe: total_capacity_t > total_load_t,
            cranes,
        };

        tracing::debug!(
            cranes = analysis.cranes.len(),
            total_capacity_t,
            total_load_t,
            is_safe = analysis.is_safe,
            "multi-crane lift evaluated"
        );

        analysis
    }
}

#[derive(Debug, Clone)]
pub struct MultiCraneAnalysis {
    pub total_load: Mass,

    /// Sum of every crane's independently derated capacity
    pub total_capacity: Mass,

    pub cranes: Vec<CraneShare>,

    /// Combined capacity strictly exceeds the total load
    pub is_safe: bool,
}

impl MultiCraneAnalysis {
    /// Index of the crane carrying the largest share of its own capacity
    pub fn most_utilized(&self) -> Option<usize> {
        self.cranes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.utilization_pct.map(|u| (i, u)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Combined load as a percentage of combined capacity
    pub fn utilization_pct(&self) -> Option<f64> {
        let capacity_t = self.total_capacity.get::<megagram>();
        if capacity_t > 0.0 {
            Some(self.total_load.get::<megagram>() / capacity_t * 100.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct CraneShare {
    pub label: String,

    /// Fraction of the total load (0.0 to 1.0)
    pub share_fraction: f64,

    /// Load carried by this crane
    pub load_share: Mass,

    /// Share as a percentage of this crane's capacity; None when it has none
    pub utilization_pct: Option<f64>,

    /// This crane's own verdict against its share
    pub result: CapacityResult,
}
