pub mod units;
mod conversion;

pub use conversion::*;
pub use units::*;

// Re-export nalgebra
pub use nalgebra as na;
