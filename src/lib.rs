//! telemetry-chart: windowed resampling for scrolling telemetry line charts.
//!
//! `core` holds the data model and the resampling algorithm (`DataSeries`,
//! `QueryWindow`, `UnitLabel`). `api` turns scroll and zoom state into
//! per-series queries and a backend-agnostic `render::RenderFrame`.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, LineChart};
pub use error::{ChartError, ChartResult};
