pub mod data_series;
pub mod primitives;
pub mod types;
pub mod unit_label;
pub mod windowing;

pub use data_series::{DataSeries, MIN_SERIES_VALUE, SeriesCacheStats};
pub use types::{DataPoint, Viewport};
pub use unit_label::UnitLabel;
pub use windowing::QueryWindow;
