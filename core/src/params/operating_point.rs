use crate::prelude::{require_positive, CurveError, CurveResult};
use serde::{Deserialize, Serialize};

/// Two known operating points of a motor: no-load and rated load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingPoint {
    pub synchronous_speed_rpm: f64,
    pub rated_speed_rpm: f64,
    pub zero_current_amps: f64,
    pub rated_current_amps: f64,
    pub rated_power_watts: f64,
}

impl Default for OperatingPoint {
    fn default() -> Self {
        Self {
            synchronous_speed_rpm: 1800.0,
            rated_speed_rpm: 1780.0,
            zero_current_amps: 26.4,
            rated_current_amps: 61.9,
            rated_power_watts: 37e3,
        }
    }
}

impl OperatingPoint {
    pub fn validate(&self) -> CurveResult<()> {
        require_positive("synchronous_speed_rpm", self.synchronous_speed_rpm)?;
        require_positive("rated_speed_rpm", self.rated_speed_rpm)?;
        require_positive("rated_current_amps", self.rated_current_amps)?;
        require_positive("rated_power_watts", self.rated_power_watts)?;
        if !self.zero_current_amps.is_finite() || self.zero_current_amps < 0.0 {
            return Err(CurveError::InvalidArgument(format!(
                "zero_current_amps must be non-negative, got {}",
                self.zero_current_amps
            )));
        }
        if self.rated_speed_rpm >= self.synchronous_speed_rpm {
            return Err(CurveError::InvalidArgument(format!(
                "rated speed {} rpm must be below synchronous speed {} rpm",
                self.rated_speed_rpm, self.synchronous_speed_rpm
            )));
        }
        if self.rated_current_amps <= self.zero_current_amps {
            return Err(CurveError::InvalidArgument(format!(
                "rated current {} A must exceed no-load current {} A",
                self.rated_current_amps, self.zero_current_amps
            )));
        }
        Ok(())
    }

    /// Rated slip expressed in rpm.
    pub fn slip_rpm(&self) -> f64 {
        self.synchronous_speed_rpm - self.rated_speed_rpm
    }
}
