use crate::render::RenderError;
use serde::Serialize;

/// Fraction of the data span added on each side of an auto-fitted linear axis.
const LINEAR_MARGIN: f64 = 0.05;
const TARGET_LINEAR_TICKS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    pub scale: AxisScale,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn log(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            scale: AxisScale::Log,
            min,
            max,
        }
    }

    pub fn linear(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            scale: AxisScale::Linear,
            min,
            max,
        }
    }

    /// Linear axis spanning `values` plus a small margin on both ends.
    pub fn linear_fit(label: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let (lo, hi) = if lo > hi {
            (0.0, 1.0)
        } else if hi - lo > 0.0 {
            (lo, hi)
        } else {
            (lo - 0.5, hi + 0.5)
        };
        let pad = (hi - lo) * LINEAR_MARGIN;
        Self::linear(label, lo - pad, hi + pad)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            return Err(format!(
                "axis '{}' has an empty range [{}, {}]",
                self.label, self.min, self.max
            ));
        }
        if self.scale == AxisScale::Log && self.min <= 0.0 {
            return Err(format!(
                "log axis '{}' must start above zero, got {}",
                self.label, self.min
            ));
        }
        Ok(())
    }

    /// Position of `value` along the axis as a fraction of its length.
    pub fn fraction(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self.scale {
            AxisScale::Linear => Some((value - self.min) / (self.max - self.min)),
            AxisScale::Log => {
                if value <= 0.0 {
                    return None;
                }
                let lo = self.min.log10();
                Some((value.log10() - lo) / (self.max.log10() - lo))
            }
        }
    }

    pub fn ticks(&self) -> Vec<Tick> {
        match self.scale {
            AxisScale::Linear => self.linear_ticks(),
            AxisScale::Log => self.log_ticks(),
        }
    }

    /// Plain decimal label for a tick, never scientific notation.
    pub fn tick_label(&self, value: f64) -> String {
        let decimals = match self.scale {
            AxisScale::Linear => decimals_for(self.linear_step()),
            AxisScale::Log => decimals_for(value),
        };
        format!("{:.*}", decimals, value)
    }

    fn linear_step(&self) -> f64 {
        let raw = (self.max - self.min) / TARGET_LINEAR_TICKS;
        let magnitude = 10f64.powf(raw.log10().floor());
        let normalized = raw / magnitude;
        let nice = [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .find(|&step| step >= normalized)
            .unwrap_or(10.0);
        nice * magnitude
    }

    fn linear_ticks(&self) -> Vec<Tick> {
        let step = self.linear_step();
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        (first..=last)
            .map(|k| Tick {
                value: k as f64 * step,
                major: true,
            })
            .collect()
    }

    fn log_ticks(&self) -> Vec<Tick> {
        let first = self.min.log10().floor() as i32;
        let last = self.max.log10().ceil() as i32;
        let mut ticks = Vec::new();
        for exponent in first..=last {
            let base = decade(exponent);
            for mantissa in 1..=9 {
                let value = mantissa as f64 * base;
                if value >= self.min && value <= self.max {
                    ticks.push(Tick {
                        value,
                        major: mantissa == 1,
                    });
                }
            }
        }
        ticks
    }
}

// Division keeps negative powers correctly rounded (0.1, 0.01, ...).
fn decade(exponent: i32) -> f64 {
    if exponent >= 0 {
        10f64.powi(exponent)
    } else {
        1.0 / 10f64.powi(-exponent)
    }
}

fn decimals_for(value: f64) -> usize {
    let value = value.abs();
    if value == 0.0 || value >= 1.0 {
        0
    } else {
        (-value.log10().floor()) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Circle,
    Triangle,
}

/// Stroke sizes are in points and scaled by the chart DPI when drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub color: String,
    pub line_width: f64,
    pub dash: Dash,
    pub marker: Option<Marker>,
    pub marker_size: f64,
    pub opacity: f64,
}

impl SeriesStyle {
    pub fn line(color: &str, line_width: f64) -> Self {
        Self {
            color: color.to_string(),
            line_width,
            dash: Dash::Solid,
            marker: None,
            marker_size: 6.0,
            opacity: 1.0,
        }
    }

    pub fn dash(mut self, dash: Dash) -> Self {
        self.dash = dash;
        self
    }

    pub fn marker(mut self, marker: Marker, size: f64) -> Self {
        self.marker = Some(marker);
        self.marker_size = size;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

impl ChartSeries {
    pub fn new(
        label: impl Into<String>,
        points: impl IntoIterator<Item = (f64, f64)>,
        style: SeriesStyle,
    ) -> Self {
        Self {
            label: label.into(),
            points: points.into_iter().collect(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLines {
    Off,
    Major,
    Both,
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSizes {
    pub title: f64,
    pub title_bold: bool,
    pub axis_label: f64,
    pub tick: f64,
    pub legend: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 12.0,
            title_bold: false,
            axis_label: 10.0,
            tick: 10.0,
            legend: 10.0,
        }
    }
}

/// Full-height reference line at a fixed x value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalMarker {
    pub x: f64,
    pub label: String,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Output file name without extension.
    pub file_stem: String,
    pub title: String,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<ChartSeries>,
    pub vertical_markers: Vec<VerticalMarker>,
    pub grid: GridLines,
    pub fonts: FontSizes,
}

impl ChartSpec {
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.width_in * self.dpi, self.height_in * self.dpi)
    }

    /// Pixels per typographic point at this chart's DPI.
    pub fn point_scale(&self) -> f64 {
        self.dpi / 72.0
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |reason: String| RenderError::InvalidChart {
            chart: self.file_stem.clone(),
            reason,
        };
        if self.file_stem.is_empty() {
            return Err(invalid("empty file name".into()));
        }
        if !(self.width_in > 0.0 && self.height_in > 0.0 && self.dpi > 0.0) {
            return Err(invalid(format!(
                "canvas {}x{} in at {} dpi",
                self.width_in, self.height_in, self.dpi
            )));
        }
        self.x_axis.validate().map_err(&invalid)?;
        self.y_axis.validate().map_err(&invalid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_ticks_mark_decades_as_major() {
        let axis = Axis::log("time", 0.1, 1000.0);
        let ticks = axis.ticks();
        let majors: Vec<f64> = ticks.iter().filter(|t| t.major).map(|t| t.value).collect();
        assert_eq!(majors, vec![0.1, 1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(ticks.len(), 4 * 9 + 1);
    }

    #[test]
    fn log_labels_are_plain_decimals() {
        let axis = Axis::log("time", 0.1, 1000.0);
        assert_eq!(axis.tick_label(0.1), "0.1");
        assert_eq!(axis.tick_label(1.0), "1");
        assert_eq!(axis.tick_label(1000.0), "1000");
    }

    #[test]
    fn log_fraction_maps_bounds_to_edges() {
        let axis = Axis::log("current", 55.71, 1640.0);
        assert!(axis.fraction(55.71).unwrap().abs() < 1e-12);
        assert!((axis.fraction(1640.0).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(axis.fraction(0.0), None);
    }

    #[test]
    fn linear_fit_pads_the_data_range() {
        let axis = Axis::linear_fit("speed", vec![1500.0, 1800.0]);
        assert_eq!(axis.scale, AxisScale::Linear);
        assert!((axis.min - 1485.0).abs() < 1e-9);
        assert!((axis.max - 1815.0).abs() < 1e-9);
    }

    #[test]
    fn linear_ticks_use_round_steps() {
        let axis = Axis::linear("current", 0.0, 500.0);
        let values: Vec<f64> = axis.ticks().iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0]);
        assert_eq!(axis.tick_label(300.0), "300");
    }

    #[test]
    fn log_axis_must_start_above_zero() {
        assert!(Axis::log("time", 0.0, 10.0).validate().is_err());
        assert!(Axis::linear("time", 5.0, 5.0).validate().is_err());
    }
}
