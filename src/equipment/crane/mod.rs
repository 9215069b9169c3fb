use crate::types::serde_quantity::{metres, tonnes};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Written in data files by its kebab-case name; read back through `FromStr`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CraneType {
    MobileTelescopic,
    MobileLattice,
    AllTerrain,
    RoughTerrain,
    Crawler,
    Tower,
    TruckMounted,
}

impl CraneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CraneType::MobileTelescopic => "mobile-telescopic",
            CraneType::MobileLattice => "mobile-lattice",
            CraneType::AllTerrain => "all-terrain",
            CraneType::RoughTerrain => "rough-terrain",
            CraneType::Crawler => "crawler",
            CraneType::Tower => "tower",
            CraneType::TruckMounted => "truck-mounted",
        }
    }
}

impl fmt::Display for CraneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown crane type: {0}")]
pub struct UnknownCraneType(pub String);

impl FromStr for CraneType {
    type Err = UnknownCraneType;

    /// Accepts kebab-case, snake_case, spaced or CamelCase names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "mobiletelescopic" | "telescopic" => Ok(CraneType::MobileTelescopic),
            "mobilelattice" | "lattice" => Ok(CraneType::MobileLattice),
            "allterrain" | "at" => Ok(CraneType::AllTerrain),
            "roughterrain" | "rt" => Ok(CraneType::RoughTerrain),
            "crawler" => Ok(CraneType::Crawler),
            "tower" => Ok(CraneType::Tower),
            "truckmounted" | "truck" => Ok(CraneType::TruckMounted),
            _ => Err(UnknownCraneType(s.to_string())),
        }
    }
}

impl TryFrom<String> for CraneType {
    type Error = UnknownCraneType;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CraneType> for String {
    fn from(crane_type: CraneType) -> Self {
        crane_type.as_str().to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Rated capacity must be positive, got {0}")]
    NonPositiveCapacity(DisplayMass),

    #[error("Maximum radius must be positive, got {0}")]
    NonPositiveRadius(DisplayLength),

    #[error("Maximum height must be positive, got {0}")]
    NonPositiveHeight(DisplayLength),
}

/// Geometric and capacity limits of a crane model.
///
/// Rated capacity is the nominal maximum lift at minimum radius; no lift is
/// permitted beyond `max_radius` or above `max_height`. All three are strictly
/// positive, checked on construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EnvelopeFields", into = "EnvelopeFields")]
pub struct CraneEnvelope {
    rated_capacity: Mass,
    max_radius: Length,
    max_height: Length,
}

impl CraneEnvelope {
    pub fn new(
        rated_capacity: Mass,
        max_radius: Length,
        max_height: Length,
    ) -> Result<Self, EnvelopeError> {
        // written as negated comparisons so NaN is rejected too
        if !(rated_capacity.get::<megagram>() > 0.0) {
            return Err(EnvelopeError::NonPositiveCapacity(DisplayMass(rated_capacity)));
        }
        if !(max_radius.get::<meter>() > 0.0) {
            return Err(EnvelopeError::NonPositiveRadius(DisplayLength(max_radius)));
        }
        if !(max_height.get::<meter>() > 0.0) {
            return Err(EnvelopeError::NonPositiveHeight(DisplayLength(max_height)));
        }

        Ok(Self {
            rated_capacity,
            max_radius,
            max_height,
        })
    }

    /// Shorthand for metric data: tonnes and metres
    pub fn metric(
        rated_capacity_t: f64,
        max_radius_m: f64,
        max_height_m: f64,
    ) -> Result<Self, EnvelopeError> {
        Self::new(
            Mass::new::<megagram>(rated_capacity_t),
            Length::new::<meter>(max_radius_m),
            Length::new::<meter>(max_height_m),
        )
    }

    pub fn rated_capacity(&self) -> Mass {
        self.rated_capacity
    }

    pub fn max_radius(&self) -> Length {
        self.max_radius
    }

    pub fn max_height(&self) -> Length {
        self.max_height
    }

    /// True when the point lies inside the envelope (limits inclusive)
    pub fn contains(&self, radius: Length, height: Length) -> bool {
        !(radius > self.max_radius || height > self.max_height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnvelopeFields {
    #[serde(with = "tonnes")]
    rated_capacity: Mass,
    #[serde(with = "metres")]
    max_radius: Length,
    #[serde(with = "metres")]
    max_height: Length,
}

impl TryFrom<EnvelopeFields> for CraneEnvelope {
    type Error = EnvelopeError;

    fn try_from(fields: EnvelopeFields) -> Result<Self, Self::Error> {
        CraneEnvelope::new(fields.rated_capacity, fields.max_radius, fields.max_height)
    }
}

impl From<CraneEnvelope> for EnvelopeFields {
    fn from(envelope: CraneEnvelope) -> Self {
        Self {
            rated_capacity: envelope.rated_capacity,
            max_radius: envelope.max_radius,
            max_height: envelope.max_height,
        }
    }
}

/// A crane model as listed in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneModel {
    pub manufacturer: String,
    pub model: String,
    pub crane_type: CraneType,
    pub envelope: CraneEnvelope,
}

impl CraneModel {
    pub fn new(
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        crane_type: CraneType,
        envelope: CraneEnvelope,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            crane_type,
            envelope,
        }
    }

    /// Registry key, "Manufacturer:Model"
    pub fn key(&self) -> String {
        registry_key(&self.manufacturer, &self.model)
    }
}

pub(crate) fn registry_key(manufacturer: &str, model: &str) -> String {
    format!("{}:{}", manufacturer, model)
}
