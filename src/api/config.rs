use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const DEFAULT_SAMPLE_RATE_PX: u32 = 15;
pub const DEFAULT_TEXT_SIZE_PX: f64 = 12.0;
pub const DEFAULT_LINE_WIDTH_PX: f64 = 2.0;
pub const DEFAULT_SCALE_MS_PER_PX: f64 = 100.0;
pub const DEFAULT_MIN_SCALE_MS_PER_PX: f64 = 1.0;
pub const DEFAULT_MAX_SCALE_MS_PER_PX: f64 = 100_000.0;
pub const DEFAULT_ZOOM_RATE: f64 = 1.25;
pub const DEFAULT_LABEL_PRECISION: usize = 2;
pub const DEFAULT_GRID_COLOR: Color = Color::rgb(0.878, 0.878, 0.878);
pub const DEFAULT_TEXT_COLOR: Color = Color::rgb(0.259, 0.259, 0.259);

/// Public chart bootstrap configuration.
///
/// Every field except the viewport has a serde default, so a host can
/// persist only the settings it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    /// Pixel stride between two resampled values.
    #[serde(default = "default_sample_rate_px")]
    pub sample_rate_px: u32,
    #[serde(default = "default_text_size_px")]
    pub text_size_px: f64,
    #[serde(default = "default_line_width_px")]
    pub line_width_px: f64,
    /// Initial zoom, in milliseconds per pixel.
    #[serde(default = "default_scale")]
    pub default_scale: f64,
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    /// Scale multiplier applied by one `zoom_out` step.
    #[serde(default = "default_zoom_rate")]
    pub zoom_rate: f64,
    #[serde(default = "default_label_precision")]
    pub label_precision: usize,
    /// Replaces the aggregated data max as input to the vertical axis.
    #[serde(default)]
    pub max_value_override: Option<f64>,
    #[serde(default = "default_grid_color")]
    pub grid_color: Color,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            sample_rate_px: default_sample_rate_px(),
            text_size_px: default_text_size_px(),
            line_width_px: default_line_width_px(),
            default_scale: default_scale(),
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            zoom_rate: default_zoom_rate(),
            label_precision: default_label_precision(),
            max_value_override: None,
            grid_color: default_grid_color(),
            text_color: default_text_color(),
        }
    }

    #[must_use]
    pub fn with_sample_rate_px(mut self, sample_rate_px: u32) -> Self {
        self.sample_rate_px = sample_rate_px;
        self
    }

    #[must_use]
    pub fn with_text_size_px(mut self, text_size_px: f64) -> Self {
        self.text_size_px = text_size_px;
        self
    }

    #[must_use]
    pub fn with_line_width_px(mut self, line_width_px: f64) -> Self {
        self.line_width_px = line_width_px;
        self
    }

    /// Sets initial scale and its zoom limits, all in milliseconds per pixel.
    #[must_use]
    pub fn with_scale(mut self, default_scale: f64, min_scale: f64, max_scale: f64) -> Self {
        self.default_scale = default_scale;
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    #[must_use]
    pub fn with_zoom_rate(mut self, zoom_rate: f64) -> Self {
        self.zoom_rate = zoom_rate;
        self
    }

    #[must_use]
    pub fn with_label_precision(mut self, label_precision: usize) -> Self {
        self.label_precision = label_precision;
        self
    }

    #[must_use]
    pub fn with_max_value_override(mut self, max_value: Option<f64>) -> Self {
        self.max_value_override = max_value;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, grid_color: Color, text_color: Color) -> Self {
        self.grid_color = grid_color;
        self.text_color = text_color;
        self
    }

    /// Height of the band under the graph reserved for time labels.
    #[must_use]
    pub fn time_label_band_px(&self) -> f64 {
        self.text_size_px * 2.0
    }

    #[must_use]
    pub fn graph_width_px(&self) -> f64 {
        f64::from(self.viewport.width)
    }

    #[must_use]
    pub fn graph_height_px(&self) -> f64 {
        f64::from(self.viewport.height) - self.time_label_band_px()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.sample_rate_px == 0 {
            return Err(ChartError::InvalidConfig(
                "sample rate must be at least one pixel".to_owned(),
            ));
        }
        if !self.text_size_px.is_finite() || self.text_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "text size must be finite and > 0".to_owned(),
            ));
        }
        if !self.line_width_px.is_finite() || self.line_width_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "line width must be finite and > 0".to_owned(),
            ));
        }
        if self.graph_height_px() <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "viewport is too short for the time label band".to_owned(),
            ));
        }
        for (name, scale) in [
            ("default scale", self.default_scale),
            ("min scale", self.min_scale),
            ("max scale", self.max_scale),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !(self.min_scale <= self.default_scale && self.default_scale <= self.max_scale) {
            return Err(ChartError::InvalidConfig(
                "default scale must lie within [min scale, max scale]".to_owned(),
            ));
        }
        if !self.zoom_rate.is_finite() || self.zoom_rate <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "zoom rate must be finite and > 1".to_owned(),
            ));
        }
        if let Some(max_value) = self.max_value_override {
            if !max_value.is_finite() || max_value <= 0.0 {
                return Err(ChartError::InvalidConfig(
                    "max value override must be finite and > 0".to_owned(),
                ));
            }
        }
        self.grid_color
            .validate()
            .map_err(|err| ChartError::InvalidConfig(format!("grid color: {err}")))?;
        self.text_color
            .validate()
            .map_err(|err| ChartError::InvalidConfig(format!("text color: {err}")))?;
        Ok(())
    }

    /// Parses and validates a JSON chart configuration.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_sample_rate_px() -> u32 {
    DEFAULT_SAMPLE_RATE_PX
}

fn default_text_size_px() -> f64 {
    DEFAULT_TEXT_SIZE_PX
}

fn default_line_width_px() -> f64 {
    DEFAULT_LINE_WIDTH_PX
}

fn default_scale() -> f64 {
    DEFAULT_SCALE_MS_PER_PX
}

fn default_min_scale() -> f64 {
    DEFAULT_MIN_SCALE_MS_PER_PX
}

fn default_max_scale() -> f64 {
    DEFAULT_MAX_SCALE_MS_PER_PX
}

fn default_zoom_rate() -> f64 {
    DEFAULT_ZOOM_RATE
}

fn default_label_precision() -> usize {
    DEFAULT_LABEL_PRECISION
}

fn default_grid_color() -> Color {
    DEFAULT_GRID_COLOR
}

fn default_text_color() -> Color {
    DEFAULT_TEXT_COLOR
}
