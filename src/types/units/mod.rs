mod display;
mod explicit_unit_values;
pub mod serde_quantity;

pub use uom::si::f64::{Length, Mass};

pub use uom::si::{
    length::{centimeter, foot, inch, kilometer, meter, millimeter},
    mass::{kilogram, megagram, megagram as tonne, pound, ton_short},
};

pub use display::{DisplayLength, DisplayMass};
pub use explicit_unit_values::{LengthValue, MassValue, UnitError, WithUnit};
