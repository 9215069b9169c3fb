use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uom::si::{
    f64::{Length, Mass},
    length::{centimeter, foot, inch, meter, millimeter},
    mass::{kilogram, megagram, pound, ton_short},
};

/// A raw value tagged with the unit it was written in, as found in data files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

pub type LengthValue = WithUnit<Length>;
pub type MassValue = WithUnit<Mass>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }

    fn unit_key(&self) -> String {
        normalize_unit(&self.unit)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown length unit: {0}")]
    UnknownLengthUnit(String),

    #[error("Unknown mass unit: {0}")]
    UnknownMassUnit(String),
}

fn normalize_unit(unit: &str) -> String {
    unit.trim().to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy)]
enum LengthUnit {
    Meter,
    Centimeter,
    Millimeter,
    Foot,
    Inch,
}

impl LengthUnit {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "m" | "meter" | "metre" | "meters" | "metres" => Some(Self::Meter),
            "cm" | "centimeter" | "centimetre" | "centimeters" | "centimetres" => {
                Some(Self::Centimeter)
            }
            "mm" | "millimeter" | "millimetre" | "millimeters" | "millimetres" => {
                Some(Self::Millimeter)
            }
            "ft" | "foot" | "feet" => Some(Self::Foot),
            "in" | "inch" | "inches" => Some(Self::Inch),
            _ => None,
        }
    }

    fn build(self, value: f64) -> Length {
        match self {
            Self::Meter => Length::new::<meter>(value),
            Self::Centimeter => Length::new::<centimeter>(value),
            Self::Millimeter => Length::new::<millimeter>(value),
            Self::Foot => Length::new::<foot>(value),
            Self::Inch => Length::new::<inch>(value),
        }
    }

    fn extract(self, length: Length) -> f64 {
        match self {
            Self::Meter => length.get::<meter>(),
            Self::Centimeter => length.get::<centimeter>(),
            Self::Millimeter => length.get::<millimeter>(),
            Self::Foot => length.get::<foot>(),
            Self::Inch => length.get::<inch>(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MassUnit {
    Tonne,
    Kilogram,
    Pound,
    ShortTon,
}

impl MassUnit {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "t" | "tonne" | "tonnes" | "metric ton" | "metric tons" => Some(Self::Tonne),
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(Self::Kilogram),
            "lb" | "lbs" | "pound" | "pounds" => Some(Self::Pound),
            "short ton" | "short tons" | "us ton" | "us tons" => Some(Self::ShortTon),
            _ => None,
        }
    }

    fn build(self, value: f64) -> Mass {
        match self {
            Self::Tonne => Mass::new::<megagram>(value),
            Self::Kilogram => Mass::new::<kilogram>(value),
            Self::Pound => Mass::new::<pound>(value),
            Self::ShortTon => Mass::new::<ton_short>(value),
        }
    }

    fn extract(self, mass: Mass) -> f64 {
        match self {
            Self::Tonne => mass.get::<megagram>(),
            Self::Kilogram => mass.get::<kilogram>(),
            Self::Pound => mass.get::<pound>(),
            Self::ShortTon => mass.get::<ton_short>(),
        }
    }
}

impl WithUnit<Length> {
    pub fn to_length(&self) -> Result<Length, UnitError> {
        LengthUnit::parse(&self.unit_key())
            .map(|u| u.build(self.value))
            .ok_or_else(|| UnitError::UnknownLengthUnit(self.unit.clone()))
    }

    pub fn from_length(length: Length, unit: &str) -> Result<Self, UnitError> {
        let parsed = LengthUnit::parse(&normalize_unit(unit))
            .ok_or_else(|| UnitError::UnknownLengthUnit(unit.to_string()))?;
        Ok(Self::new(parsed.extract(length), unit))
    }
}

impl WithUnit<Mass> {
    pub fn to_mass(&self) -> Result<Mass, UnitError> {
        MassUnit::parse(&self.unit_key())
            .map(|u| u.build(self.value))
            .ok_or_else(|| UnitError::UnknownMassUnit(self.unit.clone()))
    }

    pub fn from_mass(mass: Mass, unit: &str) -> Result<Self, UnitError> {
        let parsed = MassUnit::parse(&normalize_unit(unit))
            .ok_or_else(|| UnitError::UnknownMassUnit(unit.to_string()))?;
        Ok(Self::new(parsed.extract(mass), unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_units_are_case_insensitive() {
        let a = LengthValue::new(40.0, "Metres").to_length().unwrap();
        let b = LengthValue::new(40.0, " M ").to_length().unwrap();
        assert_relative_eq!(a.get::<meter>(), 40.0);
        assert_relative_eq!(b.get::<meter>(), 40.0);
    }

    #[test]
    fn test_mass_conversion_between_units() {
        let capacity = MassValue::new(100.0, "t").to_mass().unwrap();
        assert_relative_eq!(capacity.get::<kilogram>(), 100_000.0);

        let in_lbs = MassValue::from_mass(capacity, "lbs").unwrap();
        assert_relative_eq!(in_lbs.value, 220_462.2476, epsilon = 1e-3);
        assert_eq!(in_lbs.unit, "lbs");
    }

    #[test]
    fn test_unknown_units_are_rejected() {
        assert!(matches!(
            LengthValue::new(1.0, "furlong").to_length(),
            Err(UnitError::UnknownLengthUnit(u)) if u == "furlong"
        ));
        assert!(matches!(
            MassValue::new(1.0, "stone").to_mass(),
            Err(UnitError::UnknownMassUnit(_))
        ));
        assert!(LengthValue::from_length(Length::new::<meter>(1.0), "parsec").is_err());
    }

    #[test]
    fn test_with_unit_deserializes_from_json() {
        let v: LengthValue = serde_json::from_str(r#"{"value": 58.0, "unit": "m"}"#).unwrap();
        assert_relative_eq!(v.to_length().unwrap().get::<meter>(), 58.0);
    }
}
