use ndarray::{Array1, ArrayView1};

/// Common error type for curve construction and evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type CurveResult<T> = Result<T, CurveError>;

/// Parallel x/y arrays describing one plotted curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSeries {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

impl CurveSeries {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> CurveResult<Self> {
        if x.len() != y.len() {
            return Err(CurveError::InvalidArgument(format!(
                "series length mismatch: {} x values, {} y values",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterates the series as `(x, y)` pairs in order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// A deterministic transform evaluated elementwise over a sample domain.
pub trait CurveModel {
    fn name(&self) -> &'static str;

    fn evaluate(&self, domain: ArrayView1<'_, f64>) -> CurveResult<Array1<f64>>;

    /// Evaluates the model and pairs each output with its domain value.
    fn series(&self, domain: &Array1<f64>) -> CurveResult<CurveSeries> {
        let values = self.evaluate(domain.view())?;
        CurveSeries::new(domain.clone(), values)
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> CurveResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CurveError::InvalidArgument(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}
