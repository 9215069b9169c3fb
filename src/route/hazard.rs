use crate::types::serde_quantity::metres;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Obstruction categories reported by the route detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Bridge,
    Tunnel,
    PowerLine,
    /// Sign gantries, footbridges and similar overhead structures
    Gantry,
    NarrowPassage,
    WeightRestriction,
    SharpBend,
    SteepGradient,
    LevelCrossing,
    Roundabout,
}

impl HazardType {
    /// Whether the hazard limits vertical clearance
    pub fn is_height_restrictive(&self) -> bool {
        match self {
            HazardType::Bridge | HazardType::Tunnel | HazardType::PowerLine | HazardType::Gantry => {
                true
            }
            HazardType::NarrowPassage
            | HazardType::WeightRestriction
            | HazardType::SharpBend
            | HazardType::SteepGradient
            | HazardType::LevelCrossing
            | HazardType::Roundabout => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardType::Bridge => "bridge",
            HazardType::Tunnel => "tunnel",
            HazardType::PowerLine => "power line",
            HazardType::Gantry => "gantry",
            HazardType::NarrowPassage => "narrow passage",
            HazardType::WeightRestriction => "weight restriction",
            HazardType::SharpBend => "sharp bend",
            HazardType::SteepGradient => "steep gradient",
            HazardType::LevelCrossing => "level crossing",
            HazardType::Roundabout => "roundabout",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hazard classification, ordered so that `Unsafe` dominates
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Safe,
    Caution,
    Unsafe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Safe => "safe",
            Severity::Caution => "caution",
            Severity::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected obstruction along a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub hazard_type: HazardType,

    /// Severity as tagged by the detector; clearance checks may override it
    pub severity: Severity,

    /// Vertical clearance, for height-restrictive hazards
    #[serde(default, with = "optional_metres", skip_serializing_if = "Option::is_none")]
    pub clearance: Option<Length>,

    /// Distance along the route at which the hazard is met
    #[serde(default, with = "optional_metres", skip_serializing_if = "Option::is_none")]
    pub chainage: Option<Length>,

    #[serde(default)]
    pub description: String,
}

impl Hazard {
    pub fn new(hazard_type: HazardType, severity: Severity) -> Self {
        Self {
            hazard_type,
            severity,
            clearance: None,
            chainage: None,
            description: String::new(),
        }
    }

    pub fn with_clearance(mut self, clearance: Length) -> Self {
        self.clearance = Some(clearance);
        self
    }

    pub fn with_chainage(mut self, chainage: Length) -> Self {
        self.chainage = Some(chainage);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Clearance to compare against vehicle height, if this hazard has one
    pub fn height_clearance(&self) -> Option<Length> {
        self.clearance.filter(|_| self.hazard_type.is_height_restrictive())
    }
}

mod optional_metres {
    use super::metres;
    use crate::types::Length;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(transparent)]
    struct Wrapped(#[serde(with = "metres")] Length);

    pub fn serialize<S: Serializer>(value: &Option<Length>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(length) => metres::serialize(length, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Length>, D::Error> {
        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|w| w.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Safe < Severity::Caution);
        assert!(Severity::Caution < Severity::Unsafe);
        assert_eq!(
            [Severity::Caution, Severity::Unsafe, Severity::Safe].iter().max(),
            Some(&Severity::Unsafe)
        );
        assert_eq!(Severity::default(), Severity::Safe);
    }

    #[test]
    fn test_height_clearance_only_for_overhead_types() {
        let bridge = Hazard::new(HazardType::Bridge, Severity::Safe)
            .with_clearance(Length::new::<meter>(4.8));
        assert!(bridge.height_clearance().is_some());

        let bend = Hazard::new(HazardType::SharpBend, Severity::Caution)
            .with_clearance(Length::new::<meter>(4.8));
        assert!(bend.height_clearance().is_none());
    }

    #[test]
    fn test_hazard_json_shape() {
        let hazard: Hazard = serde_json::from_str(
            r#"{"hazard_type": "power_line", "severity": "caution", "clearance": {"value": 16, "unit": "ft"}}"#,
        )
        .unwrap();
        assert_eq!(hazard.hazard_type, HazardType::PowerLine);
        assert_relative_eq!(hazard.clearance.unwrap().get::<meter>(), 4.8768, epsilon = 1e-9);
        assert!(hazard.chainage.is_none());
        assert!(hazard.description.is_empty());

        let json = serde_json::to_value(&Hazard::new(HazardType::Tunnel, Severity::Safe)).unwrap();
        assert_eq!(json["hazard_type"], "tunnel");
        assert!(json.get("clearance").is_none());
    }
}
