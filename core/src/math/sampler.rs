use crate::prelude::{CurveError, CurveResult, CurveSeries};
use ndarray::Array1;

/// Returns `count` evenly spaced values from `low` to `high`, both included.
///
/// The last element is pinned to `high` so accumulated rounding never leaves
/// the sampled domain short of its upper bound.
pub fn linspace(low: f64, high: f64, count: usize) -> CurveResult<Array1<f64>> {
    if count < 2 {
        return Err(CurveError::InvalidArgument(format!(
            "linspace needs at least 2 samples, got {}",
            count
        )));
    }
    if !low.is_finite() || !high.is_finite() {
        return Err(CurveError::InvalidArgument(format!(
            "linspace bounds must be finite, got [{}, {}]",
            low, high
        )));
    }
    if high <= low {
        return Err(CurveError::InvalidArgument(format!(
            "linspace upper bound {} must exceed lower bound {}",
            high, low
        )));
    }

    let last = count - 1;
    let step = (high - low) / last as f64;
    Ok(Array1::from_shape_fn(count, |idx| {
        if idx == last {
            high
        } else {
            low + step * idx as f64
        }
    }))
}

/// Splits literal `(x, y)` pairs into a series, keeping caller order.
pub fn tabulated(pairs: &[(f64, f64)]) -> CurveResult<CurveSeries> {
    if pairs.is_empty() {
        return Err(CurveError::InvalidArgument(
            "tabulated series needs at least one point".into(),
        ));
    }
    let x = pairs.iter().map(|&(x, _)| x).collect::<Array1<f64>>();
    let y = pairs.iter().map(|&(_, y)| y).collect::<Array1<f64>>();
    CurveSeries::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_bounds() {
        let samples = linspace(0.01, 32.0, 2000).unwrap();
        assert_eq!(samples.len(), 2000);
        assert_eq!(samples[0], 0.01);
        assert_eq!(samples[1999], 32.0);
    }

    #[test]
    fn linspace_is_strictly_increasing() {
        let samples = linspace(26.4, 483.0, 500).unwrap();
        assert!(samples.windows(2).into_iter().all(|w| w[1] > w[0]));
    }

    #[test]
    fn linspace_two_samples_are_the_bounds() {
        let samples = linspace(-1.0, 1.0, 2).unwrap();
        assert_eq!(samples.to_vec(), vec![-1.0, 1.0]);
    }

    #[test]
    fn linspace_rejects_degenerate_requests() {
        assert!(linspace(0.0, 1.0, 1).is_err());
        assert!(linspace(0.0, 1.0, 0).is_err());
        assert!(linspace(1.0, 1.0, 10).is_err());
        assert!(linspace(2.0, 1.0, 10).is_err());
        assert!(linspace(0.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn tabulated_keeps_pair_order() {
        let series = tabulated(&[(2.0, 1200.0), (2.5, 450.0)]).unwrap();
        assert_eq!(series.x.to_vec(), vec![2.0, 2.5]);
        assert_eq!(series.y.to_vec(), vec![1200.0, 450.0]);
    }

    #[test]
    fn tabulated_rejects_empty_input() {
        assert!(matches!(
            tabulated(&[]),
            Err(CurveError::InvalidArgument(_))
        ));
    }
}
