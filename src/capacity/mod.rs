pub mod derating;
pub mod lift_validation;

pub use derating::DeratingConfig;
pub use lift_validation::{
    evaluate_capacity, evaluate_capacity_with, CapacityResult, CheckStatus, DeratedCapacity,
    LiftRequest,
};
