pub mod operating_point;
pub mod simulation;

pub use operating_point::OperatingPoint;
pub use simulation::{
    reference_cold_withstand, reference_hot_withstand, SimulationParams, WithstandPoint,
};
