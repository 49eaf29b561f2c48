use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One telemetry sample. `time` is in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub value: f64,
    pub time: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(value: f64, time: f64) -> Self {
        Self { value, time }
    }

    pub fn from_decimal_at(value: Decimal, time: DateTime<Utc>) -> ChartResult<Self> {
        Ok(Self {
            value: decimal_to_f64(value, "value")?,
            time: datetime_to_unix_millis(time),
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.value.is_finite() && self.time.is_finite()
    }
}
