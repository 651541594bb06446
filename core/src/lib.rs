//! Curve models for induction-motor protection and performance studies.
//!
//! The crate covers the starting-current envelope, protective relay trip
//! tables, thermal withstand limits and the linear speed/torque relations
//! used to chart a motor against its protection.

pub mod math;
pub mod models;
pub mod params;
pub mod prelude;
pub mod telemetry;

pub use prelude::{CurveError, CurveModel, CurveResult, CurveSeries};
