pub mod speed_torque;
pub mod starting_current;
pub mod trip_curve;
pub mod withstand;

pub use speed_torque::{SpeedModel, SpeedTorqueCurves, TorqueModel};
pub use starting_current::StartingCurrentModel;
pub use trip_curve::{TripBranch, TripCurveTable};
pub use withstand::{convert_withstand, WithstandCurve};
