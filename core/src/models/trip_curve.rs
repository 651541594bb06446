use crate::prelude::{require_positive, CurveResult, CurveSeries};
use crate::telemetry::log::LogManager;
use ndarray::Array1;

/// Thermal overload branch, per-unit of nominal current.
pub const THERMAL_MULTIPLES: [f64; 8] = [1.15, 1.25, 1.5, 2.0, 3.0, 5.0, 7.8, 13.0];
/// Trip time of each thermal multiple (s).
pub const THERMAL_TIMES_S: [f64; 8] = [3600.0, 600.0, 120.0, 40.0, 15.0, 8.0, 5.0, 3.5];

/// Instantaneous (magnetic) branch, per-unit of nominal current.
pub const MAGNETIC_MULTIPLES: [f64; 2] = [13.5, 30.0];
/// Trip time of each magnetic multiple (s).
pub const MAGNETIC_TIMES_S: [f64; 2] = [0.02, 0.015];

/// One branch of a trip characteristic as parallel current/time arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct TripBranch {
    pub currents: Array1<f64>,
    pub times: Array1<f64>,
}

impl TripBranch {
    fn scaled(multiples: &[f64], times: &[f64], i_nominal: f64) -> Self {
        Self {
            currents: Array1::from(multiples.to_vec()) * i_nominal,
            times: Array1::from(times.to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        self.currents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currents.is_empty()
    }

    /// Time on x, current on y, as drawn on a coordination chart.
    pub fn time_current_series(&self) -> CurveSeries {
        CurveSeries {
            x: self.times.clone(),
            y: self.currents.clone(),
        }
    }
}

/// Thermal-magnetic motor protector trip curve scaled to a nominal current.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCurveTable {
    pub thermal: TripBranch,
    pub magnetic: TripBranch,
}

impl TripCurveTable {
    pub fn for_nominal_current(i_nominal: f64) -> CurveResult<Self> {
        require_positive("i_nominal", i_nominal)?;
        let table = Self {
            thermal: TripBranch::scaled(&THERMAL_MULTIPLES, &THERMAL_TIMES_S, i_nominal),
            magnetic: TripBranch::scaled(&MAGNETIC_MULTIPLES, &MAGNETIC_TIMES_S, i_nominal),
        };
        LogManager::new("trip-curve").trace(&format!(
            "scaled {} thermal and {} magnetic points to {} A",
            table.thermal.len(),
            table.magnetic.len(),
            i_nominal
        ));
        Ok(table)
    }
}
