use std::sync::Mutex;

/// Counts evaluated curves and samples across a run.
pub struct EvaluationMetrics {
    inner: Mutex<Counters>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub series: usize,
    pub samples: usize,
    pub errors: usize,
}

struct Counters {
    series: usize,
    samples: usize,
    errors: usize,
}

impl EvaluationMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                series: 0,
                samples: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_series(&self, samples: usize) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.series += 1;
            counters.samples += samples;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(counters) = self.inner.lock() {
            MetricsSnapshot {
                series: counters.series,
                samples: counters.samples,
                errors: counters.errors,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for EvaluationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
