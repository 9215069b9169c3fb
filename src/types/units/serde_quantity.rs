//! Serde adapters for quantities written in data and config files.
//!
//! A quantity may be given either as a bare number in the internal unit
//! (metres / tonnes) or as a `{ value, unit }` table.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uom::si::f64::{Length, Mass};

use super::explicit_unit_values::{LengthValue, MassValue};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<T> {
    Bare(f64),
    Tagged(T),
}

pub mod metres {
    use super::*;
    use serde::de::Error as _;
    use serde::ser::Error as _;

    pub fn serialize<S: Serializer>(length: &Length, serializer: S) -> Result<S::Ok, S::Error> {
        LengthValue::from_length(*length, "m")
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Length, D::Error> {
        match Repr::<LengthValue>::deserialize(deserializer)? {
            Repr::Bare(v) => Ok(crate::types::from_coord(v)),
            Repr::Tagged(v) => v.to_length().map_err(D::Error::custom),
        }
    }
}

pub mod tonnes {
    use super::*;
    use serde::de::Error as _;
    use serde::ser::Error as _;

    pub fn serialize<S: Serializer>(mass: &Mass, serializer: S) -> Result<S::Ok, S::Error> {
        MassValue::from_mass(*mass, "t")
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mass, D::Error> {
        match Repr::<MassValue>::deserialize(deserializer)? {
            Repr::Bare(v) => Ok(Mass::new::<uom::si::mass::megagram>(v)),
            Repr::Tagged(v) => v.to_mass().map_err(D::Error::custom),
        }
    }
}
