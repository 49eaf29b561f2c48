use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::QueryWindow;
use crate::core::primitives::unix_millis_to_datetime;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, LineRole, RenderFrame, TextHAlign, TextPrimitive};

use super::{Alignment, ChartConfig, SubChart};

pub const TEXT_PADDING_PX: f64 = 4.0;
pub const GRID_LINE_WIDTH_PX: f64 = 1.0;
pub const TIME_LABEL_SPACING_PX: f64 = 120.0;
const MAX_TIME_LABELS: usize = 64;
const DAY_MS: f64 = 86_400_000.0;
const TIME_LABEL_INTERVALS_MS: [f64; 16] = [
    1_000.0,
    2_000.0,
    5_000.0,
    10_000.0,
    15_000.0,
    30_000.0,
    60_000.0,
    120_000.0,
    300_000.0,
    600_000.0,
    900_000.0,
    1_800_000.0,
    3_600_000.0,
    7_200_000.0,
    21_600_000.0,
    43_200_000.0,
];

/// Scroll and zoom state a draw pass is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub visible_start_time: f64,
    /// Milliseconds per pixel.
    pub scale: f64,
    /// Pixel distance from the timeline start to the visible start.
    pub scroll_position_px: f64,
}

/// Turns a `ChartView` into per-series queries and draw primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasDrawer {
    config: ChartConfig,
}

impl CanvasDrawer {
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_max_value_override(&mut self, max_value: Option<f64>) -> ChartResult<()> {
        if let Some(value) = max_value {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(
                    "max value override must be finite and > 0".to_owned(),
                ));
            }
        }
        self.config.max_value_override = max_value;
        Ok(())
    }

    /// `(start_time, step_size, count)` every series is queried with.
    pub fn query_window(&self, view: ChartView) -> ChartResult<QueryWindow> {
        QueryWindow::for_view(
            view.visible_start_time,
            view.scale,
            view.scroll_position_px,
            self.config.graph_width_px(),
            self.config.sample_rate_px,
        )
    }

    /// Max value feeding the sub chart's vertical axis.
    pub fn shared_max_value(&self, sub_chart: &mut SubChart, window: QueryWindow) -> f64 {
        self.config
            .max_value_override
            .unwrap_or_else(|| sub_chart.get_max_value(window))
    }

    /// Builds the frame for one draw pass.
    ///
    /// The first sub chart owns the horizontal grid; every sub chart draws its
    /// own unit labels on its side. Each visible series becomes a chain of
    /// segments broken at slots without data.
    pub fn draw<'a, I>(&self, view: ChartView, sub_charts: I) -> ChartResult<RenderFrame>
    where
        I: IntoIterator<Item = &'a mut SubChart>,
    {
        let window = self.query_window(view)?;
        let graph_height = self.config.graph_height_px();
        let mut frame = RenderFrame::new(self.config.viewport);

        self.draw_time_axis(&mut frame, view);

        let mut grid_drawn = false;
        for sub_chart in sub_charts {
            let max_value = self.shared_max_value(sub_chart, window);
            let unit_label = sub_chart.unit_label_mut();
            unit_label.set_layout(graph_height, self.config.label_precision);
            unit_label.set_max_value(max_value);
            let ceiling = unit_label.max_value_cache();

            if !grid_drawn {
                self.draw_horizontal_grid(&mut frame, sub_chart.unit_label().labels().len());
                grid_drawn = true;
            }
            self.draw_unit_labels(
                &mut frame,
                sub_chart.alignment(),
                sub_chart.unit_label().labels(),
            );

            for series in sub_chart.series_iter_mut() {
                if !series.visible() {
                    continue;
                }
                let color = series.color();
                let values =
                    series.get_displayed_values(window.start_time, window.step_size, window.count);
                self.draw_series_line(&mut frame, window, values, ceiling, color);
            }
        }

        trace!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            slots = window.count,
            "built chart frame"
        );
        Ok(frame)
    }

    fn draw_series_line(
        &self,
        frame: &mut RenderFrame,
        window: QueryWindow,
        values: &[Option<f64>],
        ceiling: f64,
        color: Color,
    ) {
        let graph_height = self.config.graph_height_px();
        let mut previous: Option<(f64, f64)> = None;
        for (index, value) in values.iter().enumerate() {
            let Some(value) = value else {
                previous = None;
                continue;
            };
            let x = window.slot_x(index, self.config.sample_rate_px);
            let y = value_to_y(*value, ceiling, graph_height);
            if let Some((previous_x, previous_y)) = previous {
                frame.push_line(LinePrimitive::new(
                    previous_x,
                    previous_y,
                    x,
                    y,
                    self.config.line_width_px,
                    color,
                    LineRole::Series,
                ));
            }
            previous = Some((x, y));
        }
    }

    fn draw_horizontal_grid(&self, frame: &mut RenderFrame, label_count: usize) {
        if label_count < 2 {
            return;
        }
        let width = self.config.graph_width_px();
        for index in 0..label_count {
            let y = label_y(index, label_count, self.config.graph_height_px());
            frame.push_line(LinePrimitive::new(
                0.0,
                y,
                width,
                y,
                GRID_LINE_WIDTH_PX,
                self.config.grid_color,
                LineRole::Grid,
            ));
        }
    }

    fn draw_unit_labels(&self, frame: &mut RenderFrame, alignment: Alignment, labels: &[String]) {
        let (x, h_align) = match alignment {
            Alignment::Left => (TEXT_PADDING_PX, TextHAlign::Left),
            Alignment::Right => (
                self.config.graph_width_px() - TEXT_PADDING_PX,
                TextHAlign::Right,
            ),
        };
        let text_size = self.config.text_size_px;
        for (index, label) in labels.iter().enumerate() {
            let line_y = label_y(index, labels.len(), self.config.graph_height_px());
            let y = (line_y - TEXT_PADDING_PX).max(text_size);
            frame.push_text(TextPrimitive::new(
                label.clone(),
                x,
                y,
                text_size,
                self.config.text_color,
                h_align,
            ));
        }
    }

    fn draw_time_axis(&self, frame: &mut RenderFrame, view: ChartView) {
        let interval = time_label_interval(view.scale);
        let width = self.config.graph_width_px();
        let graph_height = self.config.graph_height_px();
        let visible_end = view.visible_start_time + width * view.scale;
        let first_tick = (view.visible_start_time / interval).ceil() * interval;
        if first_tick > visible_end {
            return;
        }

        let tick_count = (((visible_end - first_tick) / interval).floor() as usize + 1)
            .min(MAX_TIME_LABELS);
        let label_y = graph_height + self.config.text_size_px + TEXT_PADDING_PX;
        for index in 0..tick_count {
            let tick = first_tick + interval * index as f64;
            let x = (tick - view.visible_start_time) / view.scale;
            frame.push_line(LinePrimitive::new(
                x,
                0.0,
                x,
                graph_height,
                GRID_LINE_WIDTH_PX,
                self.config.grid_color,
                LineRole::Grid,
            ));
            if let Some(text) = format_time_label(tick) {
                frame.push_text(TextPrimitive::new(
                    text,
                    x,
                    label_y,
                    self.config.text_size_px,
                    self.config.text_color,
                    TextHAlign::Center,
                ));
            }
        }
    }
}

fn value_to_y(value: f64, ceiling: f64, graph_height: f64) -> f64 {
    if ceiling <= 0.0 {
        return graph_height;
    }
    graph_height - (value / ceiling) * graph_height
}

fn label_y(index: usize, label_count: usize, graph_height: f64) -> f64 {
    if label_count < 2 {
        return 0.0;
    }
    graph_height * index as f64 / (label_count - 1) as f64
}

/// Smallest "round" wall-clock interval spanning at least
/// `TIME_LABEL_SPACING_PX` at the given scale.
fn time_label_interval(scale: f64) -> f64 {
    let min_interval = scale * TIME_LABEL_SPACING_PX;
    TIME_LABEL_INTERVALS_MS
        .into_iter()
        .find(|interval| *interval >= min_interval)
        .unwrap_or_else(|| (min_interval / DAY_MS).ceil() * DAY_MS)
}

fn format_time_label(millis: f64) -> Option<String> {
    unix_millis_to_datetime(millis).map(|time| time.format("%H:%M:%S").to_string())
}
