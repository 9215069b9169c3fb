use std::fmt;
use uom::si::{
    f64::{Length, Mass},
    length::{foot, meter},
    mass::{megagram, pound},
};

#[derive(Debug, Clone, Copy)]
pub struct DisplayMass(pub Mass);
#[derive(Debug, Clone, Copy)]
pub struct DisplayLength(pub Length);

impl fmt::Display for DisplayMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tonnes = self.0.get::<megagram>();
        let lbs = self.0.get::<pound>();
        write!(f, "{:.2} t ({:.0} lbs)", tonnes, lbs)
    }
}

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0.get::<meter>();
        let feet = self.0.get::<foot>();
        write!(f, "{:.2} m ({:.1} ft)", meters, feet)
    }
}
