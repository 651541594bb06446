use crate::math::sampler::linspace;
use crate::params::SimulationParams;
use crate::prelude::{require_positive, CurveError, CurveModel, CurveResult};
use crate::telemetry::log::LogManager;
use ndarray::{Array1, ArrayView1};

/// Number of decay constants the envelope needs to settle at nominal current.
const SETTLING_DECAY_CONSTANTS: f64 = 5.0;

/// First sample of the default time domain; the log time axis cannot show 0.
const FIRST_SAMPLE_S: f64 = 0.01;

/// Time past the cold locked-rotor limit covered by the default domain.
const DOMAIN_MARGIN_S: f64 = 5.0;

/// Exponential starting-current envelope, clamped to nominal after `t_start`.
#[derive(Debug, Clone)]
pub struct StartingCurrentModel {
    i_start: f64,
    i_nominal: f64,
    t_start: f64,
    logger: LogManager,
}

impl StartingCurrentModel {
    pub fn new(i_start: f64, i_nominal: f64, t_start: f64) -> CurveResult<Self> {
        require_positive("t_start", t_start)?;
        require_positive("i_nominal", i_nominal)?;
        require_positive("i_start", i_start)?;
        if i_start < i_nominal {
            return Err(CurveError::InvalidArgument(format!(
                "starting current {} A is below nominal current {} A",
                i_start, i_nominal
            )));
        }
        Ok(Self {
            i_start,
            i_nominal,
            t_start,
            logger: LogManager::new("starting-current"),
        })
    }

    pub fn from_params(params: &SimulationParams) -> CurveResult<Self> {
        Self::new(params.i_start_peak, params.i_nominal, params.t_start)
    }

    pub fn decay_constant(&self) -> f64 {
        self.t_start / SETTLING_DECAY_CONSTANTS
    }

    /// Envelope value at `t` seconds; `t` is expected to be non-negative.
    pub fn current_at(&self, t: f64) -> f64 {
        if t > self.t_start {
            return self.i_nominal;
        }
        (self.i_start - self.i_nominal) * (-t / self.decay_constant()).exp() + self.i_nominal
    }

    /// Default sample times: from 10 ms to five seconds past the cold locked-rotor time.
    pub fn time_domain(params: &SimulationParams, samples: usize) -> CurveResult<Array1<f64>> {
        linspace(FIRST_SAMPLE_S, params.t_lrc_cold + DOMAIN_MARGIN_S, samples)
    }
}

impl CurveModel for StartingCurrentModel {
    fn name(&self) -> &'static str {
        "starting-current"
    }

    fn evaluate(&self, domain: ArrayView1<'_, f64>) -> CurveResult<Array1<f64>> {
        if let Some(bad) = domain.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(CurveError::InvalidArgument(format!(
                "sample time {} is negative or not finite",
                bad
            )));
        }

        let currents = domain.mapv(|t| self.current_at(t));
        self.logger.trace(&format!(
            "{} samples, decay constant {:.4} s",
            currents.len(),
            self.decay_constant()
        ));
        Ok(currents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn reference_model() -> StartingCurrentModel {
        StartingCurrentModel::from_params(&SimulationParams::default()).unwrap()
    }

    #[test]
    fn envelope_starts_at_peak_current() {
        assert_eq!(reference_model().current_at(0.0), 820.0);
    }

    #[test]
    fn envelope_is_nominal_after_start_time() {
        let model = reference_model();
        let currents = model
            .evaluate(array![0.75 + 1e-9, 0.76, 1.0, 27.0, 32.0].view())
            .unwrap();
        assert!(currents.iter().all(|&i| i == 61.9));
    }

    #[test]
    fn envelope_decays_strictly_before_start_time() {
        let model = reference_model();
        let domain = linspace(0.0, 0.7499, 200).unwrap();
        let currents = model.evaluate(domain.view()).unwrap();
        assert!(currents.windows(2).into_iter().all(|w| w[1] < w[0]));
    }

    #[test]
    fn envelope_midway_matches_two_and_a_half_decay_constants() {
        let current = reference_model().current_at(0.375);
        let expected = 61.9 + 758.1 * (-2.5f64).exp();
        assert!((current - expected).abs() < 1e-9);
        assert!((current - 124.2).abs() / 124.2 < 0.01);
    }

    #[test]
    fn zero_start_time_is_invalid_argument() {
        let err = StartingCurrentModel::new(820.0, 61.9, 0.0).unwrap_err();
        assert!(matches!(err, CurveError::InvalidArgument(_)));
    }

    #[test]
    fn negative_sample_time_is_rejected() {
        assert!(reference_model().evaluate(array![-0.1, 0.2].view()).is_err());
    }

    #[test]
    fn default_domain_spans_past_locked_rotor_time() {
        let domain = StartingCurrentModel::time_domain(&SimulationParams::default(), 2000).unwrap();
        assert_eq!(domain.len(), 2000);
        assert_eq!(domain[0], 0.01);
        assert_eq!(domain[1999], 32.0);
    }

    #[test]
    fn series_pairs_times_with_currents() {
        let series = reference_model().series(&array![0.0, 1.0]).unwrap();
        assert_eq!(series.y.to_vec(), vec![820.0, 61.9]);
    }
}
