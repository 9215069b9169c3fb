use nalgebra as na;
use uom::si::{f64::Length, length::meter};

/// Convert UOM Length to internal plan coordinate (metres)
#[inline]
pub fn to_coord(length: Length) -> f64 {
    length.get::<meter>()
}

/// Convert internal plan coordinate (metres) to UOM Length
#[inline]
pub fn from_coord(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// Create a plan-view Point2 (easting, northing) from UOM lengths
pub fn point_from_lengths(easting: Length, northing: Length) -> na::Point2<f64> {
    na::Point2::new(to_coord(easting), to_coord(northing))
}

/// Extract easting as Length
pub fn easting(point: &na::Point2<f64>) -> Length {
    from_coord(point.x)
}

/// Extract northing as Length
pub fn northing(point: &na::Point2<f64>) -> Length {
    from_coord(point.y)
}
