//! Lift planning calculations: crane capacity derating, multi-crane load
//! sharing, and abnormal-load route hazard scoring.
//!
//! All calculations are pure functions over their inputs. Quantities are
//! `uom` types; data files may give them as `{ value, unit }` pairs.

pub mod types;
pub mod config;
pub mod equipment;
pub mod capacity;
pub mod route;

pub use types::*;
pub use config::{ConfigError, PlannerConfig};
pub use capacity::{evaluate_capacity, evaluate_capacity_with, CapacityResult, LiftRequest};
pub use equipment::{CraneEnvelope, CraneRegistry, MultiCraneLift};
pub use route::{score_route, score_route_with, Hazard, HazardType, RouteOption, Severity};
