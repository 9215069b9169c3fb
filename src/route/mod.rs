pub mod hazard;
pub mod option;
pub mod path;
pub mod scoring;

pub use hazard::{Hazard, HazardType, Severity};
pub use option::{rank_routes, RouteOption};
pub use path::RoutePath;
pub use scoring::{score_route, score_route_with, RouteScore, ScoringConfig, SeverityPenalties};
