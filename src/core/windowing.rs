use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Resampling request passed to every `DataSeries` during one draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryWindow {
    pub start_time: f64,
    pub step_size: f64,
    pub count: usize,
    /// Pixel distance between the first slot and the graph's left edge.
    pub offset_px: f64,
}

impl QueryWindow {
    /// Maps a scroll position onto a lattice of samples anchored to the
    /// absolute timeline.
    ///
    /// One sample is taken every `sample_rate_px` pixels. The lattice is
    /// shifted left by `scroll_position_px mod sample_rate_px` so scrolling by
    /// less than one stride moves the line instead of re-sampling it, and one
    /// extra sample is requested past each edge so the line reaches the canvas
    /// borders.
    pub fn for_view(
        visible_start_time: f64,
        scale: f64,
        scroll_position_px: f64,
        graph_width_px: f64,
        sample_rate_px: u32,
    ) -> ChartResult<Self> {
        if !visible_start_time.is_finite()
            || !scroll_position_px.is_finite()
            || !graph_width_px.is_finite()
        {
            return Err(ChartError::InvalidData(
                "query window inputs must be finite".to_owned(),
            ));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "chart scale must be finite and > 0".to_owned(),
            ));
        }
        if sample_rate_px == 0 {
            return Err(ChartError::InvalidData(
                "sample rate must be at least one pixel".to_owned(),
            ));
        }

        let sample_rate = f64::from(sample_rate_px);
        let offset_px = scroll_position_px.rem_euclid(sample_rate);
        let start_time = visible_start_time - offset_px * scale;
        let width = graph_width_px.max(0.0);
        let count = ((width + offset_px) / sample_rate).ceil() as usize + 1;

        Ok(Self {
            start_time,
            step_size: scale * sample_rate,
            count,
            offset_px,
        })
    }

    #[must_use]
    pub fn end_time(self) -> f64 {
        self.start_time + self.step_size * self.count as f64
    }

    /// X coordinate of slot `index`, relative to the graph's left edge.
    #[must_use]
    pub fn slot_x(self, index: usize, sample_rate_px: u32) -> f64 {
        index as f64 * f64::from(sample_rate_px) - self.offset_px
    }
}
