use crate::math::sampler::linspace;
use crate::params::OperatingPoint;
use crate::prelude::{CurveError, CurveModel, CurveResult};
use crate::telemetry::log::LogManager;
use ndarray::{Array1, ArrayView1};
use std::f64::consts::PI;

/// Rotor speed as a linear function of current through the no-load and rated points.
///
/// Outside the two operating points the line is extrapolated, not clamped.
#[derive(Debug, Clone)]
pub struct SpeedModel {
    point: OperatingPoint,
}

impl SpeedModel {
    pub fn new(point: OperatingPoint) -> CurveResult<Self> {
        point.validate()?;
        Ok(Self { point })
    }

    pub fn speed_at(&self, current: f64) -> f64 {
        let p = &self.point;
        let fraction = (current - p.zero_current_amps) / (p.rated_current_amps - p.zero_current_amps);
        p.synchronous_speed_rpm + fraction * (p.rated_speed_rpm - p.synchronous_speed_rpm)
    }
}

impl CurveModel for SpeedModel {
    fn name(&self) -> &'static str {
        "speed"
    }

    fn evaluate(&self, domain: ArrayView1<'_, f64>) -> CurveResult<Array1<f64>> {
        require_finite("current", domain)?;
        Ok(domain.mapv(|current| self.speed_at(current)))
    }
}

/// Torque from the linear torque/slip relation anchored at rated torque.
#[derive(Debug, Clone)]
pub struct TorqueModel {
    point: OperatingPoint,
    rated_torque: f64,
}

impl TorqueModel {
    pub fn new(point: OperatingPoint) -> CurveResult<Self> {
        point.validate()?;
        let rated_torque = point.rated_power_watts / rated_angular_velocity(point.rated_speed_rpm);
        Ok(Self {
            point,
            rated_torque,
        })
    }

    /// Rated shaft torque in N·m.
    pub fn rated_torque(&self) -> f64 {
        self.rated_torque
    }

    pub fn torque_at(&self, speed_rpm: f64) -> f64 {
        let p = &self.point;
        self.rated_torque * (p.synchronous_speed_rpm - speed_rpm) / p.slip_rpm()
    }
}

impl CurveModel for TorqueModel {
    fn name(&self) -> &'static str {
        "torque"
    }

    fn evaluate(&self, domain: ArrayView1<'_, f64>) -> CurveResult<Array1<f64>> {
        require_finite("speed", domain)?;
        Ok(domain.mapv(|speed| self.torque_at(speed)))
    }
}

/// Angular velocity in rad/s of a shaft turning at `speed_rpm`.
pub fn rated_angular_velocity(speed_rpm: f64) -> f64 {
    2.0 * PI * speed_rpm / 60.0
}

fn require_finite(quantity: &str, domain: ArrayView1<'_, f64>) -> CurveResult<()> {
    match domain.iter().find(|value| !value.is_finite()) {
        Some(bad) => Err(CurveError::InvalidArgument(format!(
            "{} sample {} is not finite",
            quantity, bad
        ))),
        None => Ok(()),
    }
}

/// Speed and torque evaluated over a sampled current range.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTorqueCurves {
    pub currents: Array1<f64>,
    pub speeds: Array1<f64>,
    pub torques: Array1<f64>,
    pub rated_torque: f64,
}

impl SpeedTorqueCurves {
    /// Samples `count` currents from the no-load current up to `current_ceiling`
    /// and chains the speed and torque relations over them.
    pub fn evaluate(
        point: OperatingPoint,
        current_ceiling: f64,
        count: usize,
    ) -> CurveResult<Self> {
        let speed_model = SpeedModel::new(point)?;
        let torque_model = TorqueModel::new(point)?;

        let currents = linspace(point.zero_current_amps, current_ceiling, count)?;
        let speeds = speed_model.evaluate(currents.view())?;
        let torques = torque_model.evaluate(speeds.view())?;

        LogManager::new("speed-torque").record(&format!(
            "{} currents up to {} A, rated torque {:.2} N·m",
            currents.len(),
            current_ceiling,
            torque_model.rated_torque()
        ));

        Ok(Self {
            currents,
            speeds,
            torques,
            rated_torque: torque_model.rated_torque(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn speed_hits_both_operating_points() {
        let model = SpeedModel::new(OperatingPoint::default()).unwrap();
        assert_eq!(model.speed_at(61.9), 1780.0);
        assert_eq!(model.speed_at(26.4), 1800.0);
    }

    #[test]
    fn speed_extrapolates_beyond_rated_current() {
        let model = SpeedModel::new(OperatingPoint::default()).unwrap();
        let speed = model.speed_at(483.0);
        let expected = 1800.0 - 20.0 * (483.0 - 26.4) / (61.9 - 26.4);
        assert!((speed - expected).abs() < TOLERANCE);
        assert!(speed < 1780.0);
    }

    #[test]
    fn torque_is_zero_at_synchronous_and_rated_at_rated_speed() {
        let model = TorqueModel::new(OperatingPoint::default()).unwrap();
        assert!(model.torque_at(1800.0).abs() < TOLERANCE);
        assert!((model.torque_at(1780.0) - model.rated_torque()).abs() < TOLERANCE);
    }

    #[test]
    fn rated_torque_follows_power_over_angular_velocity() {
        let model = TorqueModel::new(OperatingPoint::default()).unwrap();
        let expected = 37e3 / (2.0 * PI * 1780.0 / 60.0);
        assert!((model.rated_torque() - expected).abs() < TOLERANCE);
        assert!((model.rated_torque() - 198.5).abs() < 0.1);
    }

    #[test]
    fn equal_rated_and_synchronous_speed_is_invalid_argument() {
        let point = OperatingPoint {
            rated_speed_rpm: 1800.0,
            ..Default::default()
        };
        assert!(matches!(
            TorqueModel::new(point),
            Err(CurveError::InvalidArgument(_))
        ));
        assert!(SpeedModel::new(point).is_err());
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let model = SpeedModel::new(OperatingPoint::default()).unwrap();
        assert!(model.evaluate(array![30.0, f64::NAN].view()).is_err());
    }

    #[test]
    fn chained_curves_cover_the_current_range() {
        let curves = SpeedTorqueCurves::evaluate(OperatingPoint::default(), 483.0, 500).unwrap();
        assert_eq!(curves.currents.len(), 500);
        assert_eq!(curves.speeds.len(), 500);
        assert_eq!(curves.torques.len(), 500);
        assert_eq!(curves.currents[0], 26.4);
        assert_eq!(curves.currents[499], 483.0);
        assert_eq!(curves.speeds[0], 1800.0);
        assert!(curves.torques[0].abs() < TOLERANCE);
        assert!(curves.torques.windows(2).into_iter().all(|w| w[1] > w[0]));
    }

    #[test]
    fn ceiling_below_no_load_current_is_rejected() {
        assert!(SpeedTorqueCurves::evaluate(OperatingPoint::default(), 20.0, 500).is_err());
    }
}
