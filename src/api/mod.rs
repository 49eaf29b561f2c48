mod canvas_drawer;
mod config;
mod line_chart;
mod scrollbar;
mod sub_chart;

pub use canvas_drawer::{
    CanvasDrawer, ChartView, GRID_LINE_WIDTH_PX, TEXT_PADDING_PX, TIME_LABEL_SPACING_PX,
};
pub use config::{
    ChartConfig, DEFAULT_GRID_COLOR, DEFAULT_LABEL_PRECISION, DEFAULT_LINE_WIDTH_PX,
    DEFAULT_MAX_SCALE_MS_PER_PX, DEFAULT_MIN_SCALE_MS_PER_PX, DEFAULT_SAMPLE_RATE_PX,
    DEFAULT_SCALE_MS_PER_PX, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_SIZE_PX, DEFAULT_ZOOM_RATE,
};
pub use line_chart::LineChart;
pub use scrollbar::{RIGHT_EDGE_TOLERANCE_PX, Scrollbar};
pub use sub_chart::{Alignment, SubChart};
