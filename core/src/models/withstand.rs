use crate::math::sampler::tabulated;
use crate::params::WithstandPoint;
use crate::prelude::{require_positive, CurveResult, CurveSeries};
use ndarray::Array1;

/// Absolute thermal withstand curve.
#[derive(Debug, Clone, PartialEq)]
pub struct WithstandCurve {
    pub times: Array1<f64>,
    pub currents: Array1<f64>,
}

impl WithstandCurve {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn time_current_series(&self) -> CurveSeries {
        CurveSeries {
            x: self.times.clone(),
            y: self.currents.clone(),
        }
    }
}

/// Scales per-unit withstand points by `i_nominal`; order and times are kept.
pub fn convert_withstand(points: &[WithstandPoint], i_nominal: f64) -> CurveResult<WithstandCurve> {
    require_positive("i_nominal", i_nominal)?;
    let pairs = points
        .iter()
        .map(|point| (point.multiple, point.time_s))
        .collect::<Vec<_>>();
    let table = tabulated(&pairs)?;

    Ok(WithstandCurve {
        currents: table.x * i_nominal,
        times: table.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{reference_cold_withstand, reference_hot_withstand};
    use crate::prelude::CurveError;

    #[test]
    fn conversion_scales_currents_and_keeps_times() {
        let points = reference_cold_withstand();
        let curve = convert_withstand(&points, 61.9).unwrap();
        assert_eq!(curve.len(), points.len());
        for (idx, point) in points.iter().enumerate() {
            assert_eq!(curve.currents[idx], point.multiple * 61.9);
            assert_eq!(curve.times[idx], point.time_s);
        }
    }

    #[test]
    fn hot_curve_keeps_caller_order() {
        let curve = convert_withstand(&reference_hot_withstand(), 10.0).unwrap();
        assert_eq!(curve.times.to_vec(), vec![55.0, 50.0, 30.0, 20.0, 15.0, 11.0, 9.0]);
        assert_eq!(curve.currents[0], 25.0);
    }

    #[test]
    fn unordered_points_are_not_reordered() {
        let points = [WithstandPoint::new(3.0, 10.0), WithstandPoint::new(2.0, 20.0)];
        let curve = convert_withstand(&points, 1.0).unwrap();
        assert_eq!(curve.currents.to_vec(), vec![3.0, 2.0]);
    }

    #[test]
    fn empty_table_is_invalid_argument() {
        assert!(matches!(
            convert_withstand(&[], 61.9),
            Err(CurveError::InvalidArgument(_))
        ));
    }
}
