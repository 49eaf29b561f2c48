use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DataSeries, QueryWindow, UnitLabel};

/// Side of the graph a sub chart's axis labels are drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Right,
}

/// Data series sharing one vertical axis and unit family.
///
/// Series are keyed by title and iterate in insertion order, which is also
/// their draw order.
#[derive(Debug, Clone)]
pub struct SubChart {
    alignment: Alignment,
    unit_label: UnitLabel,
    series: IndexMap<String, DataSeries>,
}

impl SubChart {
    #[must_use]
    pub fn new(alignment: Alignment, unit_label: UnitLabel) -> Self {
        Self {
            alignment,
            unit_label,
            series: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub fn unit_label(&self) -> &UnitLabel {
        &self.unit_label
    }

    pub fn unit_label_mut(&mut self) -> &mut UnitLabel {
        &mut self.unit_label
    }

    /// Adds a series, returning the one it replaced when the title was taken.
    pub fn add_data_series(&mut self, series: DataSeries) -> Option<DataSeries> {
        let title = series.title().to_owned();
        let replaced = self.series.insert(title.clone(), series);
        debug!(
            alignment = ?self.alignment,
            series = %title,
            replaced = replaced.is_some(),
            "add data series"
        );
        replaced
    }

    #[must_use]
    pub fn series(&self, title: &str) -> Option<&DataSeries> {
        self.series.get(title)
    }

    pub fn series_mut(&mut self, title: &str) -> Option<&mut DataSeries> {
        self.series.get_mut(title)
    }

    pub fn series_iter(&self) -> impl Iterator<Item = &DataSeries> {
        self.series.values()
    }

    pub fn series_iter_mut(&mut self) -> impl Iterator<Item = &mut DataSeries> {
        self.series.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn remove_outdated_data(&mut self, cutoff_time: f64) {
        for series in self.series.values_mut() {
            series.remove_outdated_data(cutoff_time);
        }
    }

    /// Largest value any visible series shows in `window`, floored at zero.
    pub fn get_max_value(&mut self, window: QueryWindow) -> f64 {
        self.series
            .values_mut()
            .filter(|series| series.visible())
            .map(|series| series.get_max_value(window.start_time, window.step_size, window.count))
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn earliest_time(&self) -> Option<f64> {
        self.series
            .values()
            .filter_map(DataSeries::earliest_time)
            .reduce(f64::min)
    }

    #[must_use]
    pub fn latest_time(&self) -> Option<f64> {
        self.series
            .values()
            .filter_map(DataSeries::latest_time)
            .reduce(f64::max)
    }
}
