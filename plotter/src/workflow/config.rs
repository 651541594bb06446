use anyhow::Context;
use motorcore::params::{
    reference_cold_withstand, reference_hot_withstand, OperatingPoint, SimulationParams,
    WithstandPoint,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of one charting run. Every field falls back to the reference motor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub simulation: SimulationParams,
    pub cold_withstand: Vec<WithstandPoint>,
    pub hot_withstand: Vec<WithstandPoint>,
    pub time_samples: usize,
    pub operating_point: OperatingPoint,
    /// Highest rotor current sampled for the speed/torque charts (A).
    pub current_ceiling_amps: f64,
    pub current_samples: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationParams::default(),
            cold_withstand: reference_cold_withstand(),
            hot_withstand: reference_hot_withstand(),
            time_samples: 2000,
            operating_point: OperatingPoint::default(),
            current_ceiling_amps: 483.0,
            current_samples: 500,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_uses_reference_motor() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.simulation.i_nominal, 61.9);
        assert_eq!(cfg.cold_withstand.len(), 7);
        assert_eq!(cfg.time_samples, 2000);
        assert_eq!(cfg.current_ceiling_amps, 483.0);
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"simulation:\n  t_start: 1.2\n  i_start_peak: 900.0\nhot_withstand:\n  - multiple: 3.0\n    time_s: 40.0\ncurrent_samples: 50\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = RunConfig::load(&path).unwrap();
        assert_eq!(cfg.simulation.t_start, 1.2);
        assert_eq!(cfg.simulation.i_start_peak, 900.0);
        assert_eq!(cfg.simulation.i_nominal, 61.9);
        assert_eq!(cfg.hot_withstand, vec![WithstandPoint::new(3.0, 40.0)]);
        assert_eq!(cfg.cold_withstand.len(), 7);
        assert_eq!(cfg.current_samples, 50);
    }

    #[test]
    fn shipped_reference_config_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../configs/reference_motor.yaml");
        assert_eq!(RunConfig::load(path).unwrap(), RunConfig::default());
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = RunConfig::load("/nonexistent/run.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("reading run config"));
    }
}
