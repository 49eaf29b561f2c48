use tracing::debug;

use crate::core::{DataSeries, QueryWindow, UnitLabel};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::{Alignment, CanvasDrawer, ChartConfig, ChartView, Scrollbar, SubChart};

/// Scrolling, zoomable telemetry line chart.
///
/// The chart owns up to two sub charts (left and right axis), the zoom
/// `scale` in milliseconds per pixel and the horizontal scroll state over the
/// timeline `[start_time, end_time]`. Ingestion goes through `series_mut`
/// followed by `update_end_time`; eviction goes through
/// `remove_outdated_data`.
#[derive(Debug, Clone)]
pub struct LineChart {
    config: ChartConfig,
    drawer: CanvasDrawer,
    scale: f64,
    scrollbar: Scrollbar,
    start_time: Option<f64>,
    end_time: Option<f64>,
    left: Option<SubChart>,
    right: Option<SubChart>,
}

impl LineChart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            sample_rate_px = config.sample_rate_px,
            scale = config.default_scale,
            "create line chart"
        );
        Ok(Self {
            config,
            drawer: CanvasDrawer::new(config),
            scale: config.default_scale,
            scrollbar: Scrollbar::default(),
            start_time: None,
            end_time: None,
            left: None,
            right: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn scrollbar(&self) -> Scrollbar {
        self.scrollbar
    }

    #[must_use]
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((self.start_time?, self.end_time?))
    }

    /// Installs a sub chart with a fresh unit family, dropping any series the
    /// previous sub chart on that side held.
    pub fn set_sub_chart<I, S>(
        &mut self,
        alignment: Alignment,
        units: I,
        unit_base: f64,
    ) -> ChartResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unit_label = UnitLabel::new(units, unit_base)?;
        let previous = self
            .sub_chart_slot(alignment)
            .replace(SubChart::new(alignment, unit_label));
        debug!(
            ?alignment,
            dropped_series = previous.map_or(0, |sub_chart| sub_chart.len()),
            "set sub chart"
        );
        Ok(())
    }

    #[must_use]
    pub fn sub_chart(&self, alignment: Alignment) -> Option<&SubChart> {
        match alignment {
            Alignment::Left => self.left.as_ref(),
            Alignment::Right => self.right.as_ref(),
        }
    }

    pub fn sub_chart_mut(&mut self, alignment: Alignment) -> Option<&mut SubChart> {
        self.sub_chart_slot(alignment).as_mut()
    }

    pub fn add_data_series(&mut self, alignment: Alignment, series: DataSeries) -> ChartResult<()> {
        let earliest = series.earliest_time();
        let latest = series.latest_time();
        let sub_chart = self.sub_chart_slot(alignment).as_mut().ok_or_else(|| {
            ChartError::InvalidConfig(format!("no {alignment:?} sub chart configured"))
        })?;
        sub_chart.add_data_series(series);

        if let Some(earliest) = earliest {
            self.start_time = Some(self.start_time.map_or(earliest, |start| start.min(earliest)));
        }
        if let Some(latest) = latest {
            self.update_end_time(latest)?;
        }
        Ok(())
    }

    pub fn series_mut(&mut self, alignment: Alignment, title: &str) -> Option<&mut DataSeries> {
        self.sub_chart_mut(alignment)?.series_mut(title)
    }

    /// Extends the timeline to `time`.
    ///
    /// A chart scrolled to the right edge keeps following the newest data.
    pub fn update_end_time(&mut self, time: f64) -> ChartResult<()> {
        if !time.is_finite() {
            return Err(ChartError::InvalidData(
                "end time must be finite".to_owned(),
            ));
        }
        let start = *self.start_time.get_or_insert(time);
        if time < start {
            self.start_time = Some(time);
        }
        self.end_time = Some(self.end_time.map_or(time, |end| end.max(time)));
        self.refresh_scroll_range();
        Ok(())
    }

    /// Evicts points with `time <= cutoff_time` from every series and moves
    /// the timeline start forward, keeping the visible window in place.
    ///
    /// The start only advances by whole sampling strides so the query lattice
    /// stays anchored to the same absolute times.
    pub fn remove_outdated_data(&mut self, cutoff_time: f64) {
        if !cutoff_time.is_finite() {
            return;
        }
        for sub_chart in [self.left.as_mut(), self.right.as_mut()].into_iter().flatten() {
            sub_chart.remove_outdated_data(cutoff_time);
        }

        let Some(start) = self.start_time else {
            return;
        };
        let target = match self.end_time {
            Some(end) => cutoff_time.min(end),
            None => cutoff_time,
        };
        let stride = self.scale * f64::from(self.config.sample_rate_px);
        let strides = ((target - start) / stride).floor();
        if !strides.is_finite() || strides < 1.0 {
            return;
        }
        let new_start = start + strides * stride;
        let shift_px = strides * f64::from(self.config.sample_rate_px);
        let follow = self.scrollbar.is_scrolled_to_right_edge();
        let kept_position = self.scrollbar.position_px() - shift_px;
        self.start_time = Some(new_start);
        self.refresh_scroll_range();
        if !follow {
            self.scrollbar.clamp_position(kept_position);
        }
        debug!(cutoff_time, new_start, "advanced chart timeline start");
    }

    /// Multiplies the scale by `ratio` within the configured limits.
    ///
    /// When following realtime the right edge stays pinned; otherwise the
    /// time at the center of the graph stays put.
    pub fn zoom(&mut self, ratio: f64) -> ChartResult<()> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom ratio must be finite and > 0".to_owned(),
            ));
        }
        let new_scale = (self.scale * ratio).clamp(self.config.min_scale, self.config.max_scale);
        if new_scale == self.scale {
            return Ok(());
        }

        let follow = self.scrollbar.is_scrolled_to_right_edge();
        let half_width = self.config.graph_width_px() / 2.0;
        let center_time = self.visible_start_time() + half_width * self.scale;
        self.scale = new_scale;
        self.refresh_scroll_range();

        if follow {
            self.scrollbar.scroll_to_right_edge();
        } else if let Some(start) = self.start_time {
            let position = (center_time - half_width * new_scale - start) / new_scale;
            self.scrollbar.set_position(position)?;
        }
        debug!(scale = new_scale, follow, "zoom chart");
        Ok(())
    }

    pub fn zoom_in(&mut self) -> ChartResult<()> {
        self.zoom(1.0 / self.config.zoom_rate)
    }

    pub fn zoom_out(&mut self) -> ChartResult<()> {
        self.zoom(self.config.zoom_rate)
    }

    pub fn scroll_by(&mut self, delta_px: f64) -> ChartResult<()> {
        if !delta_px.is_finite() {
            return Err(ChartError::InvalidData(
                "scroll delta must be finite".to_owned(),
            ));
        }
        self.scrollbar
            .set_position(self.scrollbar.position_px() + delta_px)
    }

    pub fn scroll_to(&mut self, position_px: f64) -> ChartResult<()> {
        self.scrollbar.set_position(position_px)
    }

    pub fn scroll_to_right_edge(&mut self) {
        self.scrollbar.scroll_to_right_edge();
    }

    /// Time at the graph's left edge.
    ///
    /// A timeline narrower than the graph is right-aligned so the newest
    /// sample sits at the right edge.
    #[must_use]
    pub fn visible_start_time(&self) -> f64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                let graph_span = self.config.graph_width_px() * self.scale;
                if end - start <= graph_span {
                    end - graph_span
                } else {
                    start + self.scrollbar.position_px() * self.scale
                }
            }
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn view(&self) -> ChartView {
        let visible_start_time = self.visible_start_time();
        let origin = self.start_time.unwrap_or(visible_start_time);
        ChartView {
            visible_start_time,
            scale: self.scale,
            scroll_position_px: (visible_start_time - origin) / self.scale,
        }
    }

    pub fn query_window(&self) -> ChartResult<QueryWindow> {
        self.drawer.query_window(self.view())
    }

    pub fn set_max_value_override(&mut self, max_value: Option<f64>) -> ChartResult<()> {
        self.drawer.set_max_value_override(max_value)?;
        self.config.max_value_override = max_value;
        Ok(())
    }

    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        let view = self.view();
        let sub_charts = [self.left.as_mut(), self.right.as_mut()]
            .into_iter()
            .flatten();
        self.drawer.draw(view, sub_charts)
    }

    pub fn render<R: Renderer>(&mut self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    fn sub_chart_slot(&mut self, alignment: Alignment) -> &mut Option<SubChart> {
        match alignment {
            Alignment::Left => &mut self.left,
            Alignment::Right => &mut self.right,
        }
    }

    fn refresh_scroll_range(&mut self) {
        let timeline_px = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (end - start) / self.scale,
            _ => 0.0,
        };
        self.scrollbar
            .set_range(timeline_px - self.config.graph_width_px());
    }
}
