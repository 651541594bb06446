use crate::workflow::config::RunConfig;
use anyhow::Context;
use log::info;
use motorcore::models::{
    convert_withstand, SpeedTorqueCurves, StartingCurrentModel, TripCurveTable, WithstandCurve,
};
use motorcore::params::SimulationParams;
use motorcore::prelude::{CurveModel, CurveResult, CurveSeries};
use motorcore::telemetry::{EvaluationMetrics, MetricsSnapshot};

/// Everything drawn on the coordination chart.
pub struct CoordinationResult {
    pub params: SimulationParams,
    pub starting_current: CurveSeries,
    pub trip_curve: TripCurveTable,
    pub cold_withstand: WithstandCurve,
    pub hot_withstand: WithstandCurve,
}

pub struct Runner {
    config: RunConfig,
    metrics: EvaluationMetrics,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            metrics: EvaluationMetrics::new(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn coordination(&self) -> anyhow::Result<CoordinationResult> {
        let params = self.config.simulation;
        self.track(params.validate())
            .context("validating simulation parameters")?;

        let model = self
            .track(StartingCurrentModel::from_params(&params))
            .context("building starting-current model")?;
        let times = self
            .track(StartingCurrentModel::time_domain(
                &params,
                self.config.time_samples,
            ))
            .context("sampling starting time domain")?;
        let starting_current = self
            .track(model.series(&times))
            .context("evaluating starting-current envelope")?;
        self.metrics.record_series(starting_current.len());

        let trip_curve = self
            .track(TripCurveTable::for_nominal_current(params.i_nominal))
            .context("scaling protection trip curve")?;
        self.metrics.record_series(trip_curve.thermal.len());
        self.metrics.record_series(trip_curve.magnetic.len());

        let cold_withstand = self
            .track(convert_withstand(&self.config.cold_withstand, params.i_nominal))
            .context("converting cold withstand curve")?;
        self.metrics.record_series(cold_withstand.len());

        let hot_withstand = self
            .track(convert_withstand(&self.config.hot_withstand, params.i_nominal))
            .context("converting hot withstand curve")?;
        self.metrics.record_series(hot_withstand.len());

        info!(
            "coordination: {} envelope samples, decay constant {:.3} s",
            starting_current.len(),
            model.decay_constant()
        );

        Ok(CoordinationResult {
            params,
            starting_current,
            trip_curve,
            cold_withstand,
            hot_withstand,
        })
    }

    pub fn speed_torque(&self) -> anyhow::Result<SpeedTorqueCurves> {
        let curves = self
            .track(SpeedTorqueCurves::evaluate(
                self.config.operating_point,
                self.config.current_ceiling_amps,
                self.config.current_samples,
            ))
            .context("evaluating speed/torque curves")?;
        self.metrics.record_series(curves.speeds.len());
        self.metrics.record_series(curves.torques.len());
        Ok(curves)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn track<T>(&self, result: CurveResult<T>) -> CurveResult<T> {
        if result.is_err() {
            self.metrics.record_error();
        }
        result
    }
}
