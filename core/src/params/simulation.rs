use crate::prelude::{require_positive, CurveError, CurveResult};
use serde::{Deserialize, Serialize};

/// Motor starting parameters for the coordination study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Acceleration time until the motor settles at nominal current (s).
    pub t_start: f64,
    /// Permissible locked-rotor time from cold (s).
    pub t_lrc_cold: f64,
    /// Locked-rotor (starting) current peak (A).
    pub i_start_peak: f64,
    /// Nominal full-load current (A).
    pub i_nominal: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            t_start: 0.75,
            t_lrc_cold: 27.0,
            i_start_peak: 820.0,
            i_nominal: 61.9,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> CurveResult<()> {
        require_positive("t_start", self.t_start)?;
        require_positive("t_lrc_cold", self.t_lrc_cold)?;
        require_positive("i_start_peak", self.i_start_peak)?;
        require_positive("i_nominal", self.i_nominal)?;
        if self.i_start_peak < self.i_nominal {
            return Err(CurveError::InvalidArgument(format!(
                "starting peak {} A is below nominal current {} A",
                self.i_start_peak, self.i_nominal
            )));
        }
        Ok(())
    }
}

/// One point of a thermal withstand curve, in per-unit of nominal current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WithstandPoint {
    pub multiple: f64,
    pub time_s: f64,
}

impl WithstandPoint {
    pub const fn new(multiple: f64, time_s: f64) -> Self {
        Self { multiple, time_s }
    }
}

// Datasheet values, listed in increasing current / decreasing time order.
const COLD_WITHSTAND: [(f64, f64); 7] = [
    (2.0, 1200.0),
    (2.5, 450.0),
    (3.0, 250.0),
    (4.0, 80.0),
    (5.0, 50.0),
    (6.0, 40.0),
    (7.8, 27.0),
];

const HOT_WITHSTAND: [(f64, f64); 7] = [
    (2.5, 55.0),
    (3.0, 50.0),
    (4.0, 30.0),
    (5.0, 20.0),
    (6.0, 15.0),
    (7.0, 11.0),
    (7.8, 9.0),
];

/// Cold-start thermal withstand table of the reference motor.
pub fn reference_cold_withstand() -> Vec<WithstandPoint> {
    COLD_WITHSTAND
        .iter()
        .map(|&(multiple, time_s)| WithstandPoint::new(multiple, time_s))
        .collect()
}

/// Hot-start thermal withstand table of the reference motor.
pub fn reference_hot_withstand() -> Vec<WithstandPoint> {
    HOT_WITHSTAND
        .iter()
        .map(|&(multiple, time_s)| WithstandPoint::new(multiple, time_s))
        .collect()
}
