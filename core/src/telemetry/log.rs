use log::{debug, info};

/// Tags log lines with the component that emitted them.
#[derive(Debug, Clone, Copy)]
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("{}: {}", self.component, message);
    }

    pub fn trace(&self, message: &str) {
        debug!("{}: {}", self.component, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("motorcore")
    }
}
