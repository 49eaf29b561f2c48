use ordered_float::OrderedFloat;
use tracing::{debug, trace, warn};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Max reported for a non-empty series whose query window holds no value.
pub const MIN_SERIES_VALUE: f64 = f64::MIN;

/// Counters exposed by the single-slot query cache of a `DataSeries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Whether a query result is currently held.
    pub cached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct QueryKey {
    start_time: OrderedFloat<f64>,
    step_size: OrderedFloat<f64>,
    count: usize,
}

impl QueryKey {
    fn new(start_time: f64, step_size: f64, count: usize) -> Self {
        Self {
            start_time: OrderedFloat(start_time),
            step_size: OrderedFloat(step_size),
            count,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedQuery {
    key: QueryKey,
    values: Vec<Option<f64>>,
    max_value: f64,
}

/// Append-only, time-ordered samples of one telemetry signal.
///
/// Queries resample the signal onto `count` slots of width `step_size`
/// starting at `start_time`. Each slot holds the mean of the points inside its
/// half-open `[start, end)` interval. The first and last slot are
/// interpolated from their neighbors when empty. The most recent answer is
/// memoized, so repeated queries for the same window during a render pass
/// cost nothing.
#[derive(Debug, Clone)]
pub struct DataSeries {
    title: String,
    color: Color,
    visible: bool,
    points: Vec<DataPoint>,
    cache: Option<CachedQuery>,
    cache_hits: u64,
    cache_misses: u64,
}

impl DataSeries {
    #[must_use]
    pub fn new(title: impl Into<String>, color: Color) -> Self {
        Self {
            title: title.into(),
            color,
            visible: true,
            points: Vec::new(),
            cache: None,
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn earliest_time(&self) -> Option<f64> {
        self.points.first().map(|point| point.time)
    }

    #[must_use]
    pub fn latest_time(&self) -> Option<f64> {
        self.points.last().map(|point| point.time)
    }

    #[must_use]
    pub fn cache_stats(&self) -> SeriesCacheStats {
        SeriesCacheStats {
            hits: self.cache_hits,
            misses: self.cache_misses,
            cached: self.cache.is_some(),
        }
    }

    /// Appends one sample, rejecting non-finite input and out-of-order time.
    ///
    /// A sample with the same time as the latest point is accepted.
    pub fn try_add_data_point(&mut self, value: f64, time: f64) -> ChartResult<()> {
        if !value.is_finite() || !time.is_finite() {
            return Err(ChartError::InvalidData(
                "data point value and time must be finite".to_owned(),
            ));
        }

        if let Some(last) = self.points.last() {
            if time < last.time {
                return Err(ChartError::InvalidData(format!(
                    "data point time {time} is older than latest time {}",
                    last.time
                )));
            }
        }

        self.points.push(DataPoint::new(value, time));
        self.cache = None;
        trace!(
            series = %self.title,
            count = self.points.len(),
            "append data point"
        );
        Ok(())
    }

    /// Ingestion entry point: invalid samples are dropped and logged so a
    /// malformed tick never interrupts the chart.
    pub fn add_data_point(&mut self, value: f64, time: f64) {
        if let Err(err) = self.try_add_data_point(value, time) {
            warn!(
                series = %self.title,
                value,
                time,
                last_time = self.latest_time(),
                error = %err,
                "dropping telemetry sample"
            );
        }
    }

    /// Drops every point with `time <= cutoff_time`.
    pub fn remove_outdated_data(&mut self, cutoff_time: f64) {
        let removed = self
            .points
            .partition_point(|point| point.time <= cutoff_time);
        if removed == 0 {
            return;
        }

        self.points.drain(..removed);
        self.cache = None;
        debug!(
            series = %self.title,
            removed,
            remaining = self.points.len(),
            "removed outdated data"
        );
    }

    /// Index of the first point with `point.time >= time`.
    #[must_use]
    pub fn find_lower_bound_point_index(&self, time: f64) -> usize {
        self.points.partition_point(|point| point.time < time)
    }

    /// Resampled values for `count` slots; empty when the series is hidden.
    pub fn get_displayed_values(
        &mut self,
        start_time: f64,
        step_size: f64,
        count: usize,
    ) -> &[Option<f64>] {
        if !self.visible {
            return &[];
        }
        &self
            .cached_query(QueryKey::new(start_time, step_size, count))
            .values
    }

    pub fn get_max_value(&mut self, start_time: f64, step_size: f64, count: usize) -> f64 {
        if !self.visible || self.points.is_empty() {
            return 0.0;
        }
        self.cached_query(QueryKey::new(start_time, step_size, count))
            .max_value
    }

    fn cached_query(&mut self, key: QueryKey) -> &CachedQuery {
        let query = match self.cache.take() {
            Some(cached) if cached.key == key => {
                self.cache_hits = self.cache_hits.saturating_add(1);
                cached
            }
            _ => {
                self.cache_misses = self.cache_misses.saturating_add(1);
                trace!(
                    series = %self.title,
                    start_time = key.start_time.0,
                    step_size = key.step_size.0,
                    count = key.count,
                    "series query cache miss"
                );
                self.compute_query(key)
            }
        };
        self.cache.insert(query)
    }

    fn compute_query(&self, key: QueryKey) -> CachedQuery {
        let start_time = key.start_time.0;
        let step_size = key.step_size.0;
        let count = key.count;
        let mut values = vec![None; count];

        if count == 0 || !start_time.is_finite() || !step_size.is_finite() || step_size <= 0.0 {
            return CachedQuery {
                key,
                values,
                max_value: MIN_SERIES_VALUE,
            };
        }

        let first_index = self.find_lower_bound_point_index(start_time);
        let mut next_index = first_index;
        for (slot, value) in values.iter_mut().enumerate() {
            let end_time = start_time + (slot + 1) as f64 * step_size;
            let (sample, consumed_until) = self.sample_slot(next_index, end_time);
            *value = sample;
            next_index = consumed_until;
        }

        if values[0].is_none() {
            values[0] = self.interpolate_boundary(first_index, start_time, step_size, 0.0);
        }
        let last_slot = count - 1;
        if values[last_slot].is_none() {
            values[last_slot] = self.interpolate_boundary(
                next_index,
                start_time,
                step_size,
                last_slot as f64 * step_size,
            );
        }

        let max_value = values
            .iter()
            .flatten()
            .copied()
            .fold(MIN_SERIES_VALUE, f64::max);

        CachedQuery {
            key,
            values,
            max_value,
        }
    }

    /// Averages the points from `index` up to (excluding) `end_time`.
    fn sample_slot(&self, index: usize, end_time: f64) -> (Option<f64>, usize) {
        let mut sum = 0.0;
        let mut running_mean = 0.0;
        let mut taken = 0usize;
        let mut cursor = index;
        while let Some(point) = self.points.get(cursor) {
            if point.time >= end_time {
                break;
            }
            taken += 1;
            sum += point.value;
            let n = taken as f64;
            running_mean += point.value / n - running_mean / n;
            cursor += 1;
        }

        // Falls back to the running mean when the sum overflows.
        let average = (taken > 0).then(|| {
            let mean = sum / taken as f64;
            if mean.is_finite() { mean } else { running_mean }
        });
        (average, cursor)
    }

    /// Linear interpolation between `points[after_index - 1]` and
    /// `points[after_index]`, with both times snapped onto the query lattice.
    fn interpolate_boundary(
        &self,
        after_index: usize,
        start_time: f64,
        step_size: f64,
        at_offset: f64,
    ) -> Option<f64> {
        if after_index == 0 {
            return None;
        }
        let before = self.points.get(after_index - 1)?;
        let after = self.points.get(after_index)?;

        let before_offset = lattice_offset(before.time, start_time, step_size);
        let after_offset = lattice_offset(after.time, start_time, step_size);
        let span = after_offset - before_offset;
        if span <= 0.0 {
            return None;
        }

        let ratio = (at_offset - before_offset) / span;
        let value = before.value + (after.value - before.value) * ratio;
        if value.is_finite() {
            Some(value)
        } else {
            Some(before.value * (1.0 - ratio) + after.value * ratio)
        }
    }
}

fn lattice_offset(time: f64, start_time: f64, step_size: f64) -> f64 {
    ((time - start_time) / step_size).floor() * step_size
}
