use smallvec::SmallVec;

use crate::api::DEFAULT_LABEL_PRECISION;
use crate::error::{ChartError, ChartResult};

pub const MIN_LABEL_SPACING_PX: f64 = 40.0;
pub const MAX_LABEL_COUNT: usize = 10;

/// Vertical axis labels for one unit family, e.g. `["B", "KB", "MB"]` with
/// base 1024.
///
/// The label set is recomputed whenever the axis height, the precision or
/// the maximum value changes. Labels are ordered top to bottom and always end
/// with zero.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitLabel {
    units: SmallVec<[String; 4]>,
    unit_base: f64,
    height_px: f64,
    precision: usize,
    max_value: f64,
    unit_index: usize,
    step_value: f64,
    max_value_cache: f64,
    labels: Vec<String>,
}

impl UnitLabel {
    pub fn new<I, S>(units: I, unit_base: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let units: SmallVec<[String; 4]> = units.into_iter().map(Into::into).collect();
        if units.is_empty() {
            return Err(ChartError::InvalidConfig(
                "unit label needs at least one unit".to_owned(),
            ));
        }
        let unit_base = if units.len() == 1 {
            1.0
        } else if unit_base.is_finite() && unit_base > 1.0 {
            unit_base
        } else {
            return Err(ChartError::InvalidConfig(
                "unit base must be finite and > 1 for multi-unit labels".to_owned(),
            ));
        };

        let mut label = Self {
            units,
            unit_base,
            height_px: 0.0,
            precision: DEFAULT_LABEL_PRECISION,
            max_value: 0.0,
            unit_index: 0,
            step_value: 1.0,
            max_value_cache: 0.0,
            labels: Vec::new(),
        };
        label.relayout();
        Ok(label)
    }

    #[must_use]
    pub fn units(&self) -> &[String] {
        &self.units
    }

    #[must_use]
    pub fn unit_base(&self) -> f64 {
        self.unit_base
    }

    pub fn set_layout(&mut self, height_px: f64, precision: usize) {
        let height_px = if height_px.is_finite() {
            height_px.max(0.0)
        } else {
            0.0
        };
        if height_px == self.height_px && precision == self.precision {
            return;
        }
        self.height_px = height_px;
        self.precision = precision;
        self.relayout();
    }

    pub fn set_max_value(&mut self, max_value: f64) {
        let max_value = if max_value.is_finite() {
            max_value.max(0.0)
        } else {
            0.0
        };
        if max_value == self.max_value {
            return;
        }
        self.max_value = max_value;
        self.relayout();
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn unit_index(&self) -> usize {
        self.unit_index
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.units[self.unit_index]
    }

    /// Value of the top label in base units; the chart's vertical ceiling.
    #[must_use]
    pub fn max_value_cache(&self) -> f64 {
        self.max_value_cache
    }

    /// Label step in the selected unit.
    #[must_use]
    pub fn step_value(&self) -> f64 {
        self.step_value
    }

    fn label_count(&self) -> usize {
        ((self.height_px / MIN_LABEL_SPACING_PX).floor() as usize).clamp(1, MAX_LABEL_COUNT)
    }

    fn relayout(&mut self) {
        let label_count = self.label_count();
        self.unit_index = suitable_unit_index(self.max_value, self.unit_base, self.units.len());
        let divisor = self.unit_base.powi(self.unit_index as i32);
        let scaled_max = self.max_value / divisor;

        self.step_value = if scaled_max > 0.0 {
            nice_step(scaled_max / label_count as f64)
        } else {
            1.0
        };
        let top = self.step_value * label_count as f64;
        self.max_value_cache = top * divisor;

        let decimals = label_decimals(self.step_value, self.precision);
        let unit = &self.units[self.unit_index];
        self.labels = (0..=label_count)
            .map(|i| {
                let value = top - self.step_value * i as f64;
                format_label(value, decimals, unit)
            })
            .collect();
    }
}

fn suitable_unit_index(max_value: f64, unit_base: f64, unit_count: usize) -> usize {
    let mut index = 0;
    let mut scaled = max_value;
    while index + 1 < unit_count && scaled / unit_base >= 1.0 {
        scaled /= unit_base;
        index += 1;
    }
    index
}

/// Smallest value from {1, 2, 5} x 10^k that is >= `raw`.
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = [1.0, 2.0, 5.0]
        .into_iter()
        .find(|candidate| residual <= candidate + 1e-9)
        .unwrap_or(10.0);
    factor * magnitude
}

fn label_decimals(step: f64, precision: usize) -> usize {
    if step >= 1.0 {
        return 0;
    }
    let needed = (-step.log10()).ceil().max(0.0) as usize;
    needed.min(precision)
}

fn format_label(value: f64, decimals: usize, unit: &str) -> String {
    // Avoid "-0" from subtraction noise at the bottom label.
    let value = if value.abs() < 1e-12 { 0.0 } else { value };
    if unit.is_empty() {
        format!("{value:.decimals$}")
    } else {
        format!("{value:.decimals$} {unit}")
    }
}
