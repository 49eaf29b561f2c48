use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Positions within this distance of the range end count as "at the edge".
pub const RIGHT_EDGE_TOLERANCE_PX: f64 = 1.0;

/// Horizontal scroll state in pixels over the chart timeline.
///
/// `range_px` is the scrollable distance (timeline width minus graph width).
/// A scrollbar parked at the right edge follows new data as the range grows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scrollbar {
    range_px: f64,
    position_px: f64,
}

impl Scrollbar {
    #[must_use]
    pub fn range_px(self) -> f64 {
        self.range_px
    }

    #[must_use]
    pub fn position_px(self) -> f64 {
        self.position_px
    }

    pub fn set_range(&mut self, range_px: f64) {
        let range_px = if range_px.is_finite() {
            range_px.max(0.0)
        } else {
            0.0
        };
        let follow = self.is_scrolled_to_right_edge();
        self.range_px = range_px;
        self.position_px = if follow {
            range_px
        } else {
            self.position_px.min(range_px)
        };
    }

    pub fn set_position(&mut self, position_px: f64) -> ChartResult<()> {
        if !position_px.is_finite() {
            return Err(ChartError::InvalidData(
                "scroll position must be finite".to_owned(),
            ));
        }
        self.clamp_position(position_px);
        Ok(())
    }

    /// Moves to `position_px` clamped into `[0, range_px]`. NaN keeps the
    /// current position.
    pub fn clamp_position(&mut self, position_px: f64) {
        if position_px.is_nan() {
            return;
        }
        self.position_px = position_px.clamp(0.0, self.range_px);
    }

    #[must_use]
    pub fn is_scrolled_to_right_edge(self) -> bool {
        self.range_px - self.position_px <= RIGHT_EDGE_TOLERANCE_PX
    }

    pub fn scroll_to_right_edge(&mut self) {
        self.position_px = self.range_px;
    }
}

#[cfg(test)]
mod tests {
    use super::Scrollbar;

    #[test]
    fn growing_range_keeps_position_unless_parked_at_edge() {
        let mut scrollbar = Scrollbar::default();
        scrollbar.set_range(100.0);
        assert_eq!(scrollbar.position_px(), 100.0);

        scrollbar.set_position(40.0).expect("position");
        scrollbar.set_range(300.0);
        assert_eq!(scrollbar.position_px(), 40.0);

        scrollbar.scroll_to_right_edge();
        scrollbar.set_range(500.0);
        assert_eq!(scrollbar.position_px(), 500.0);
    }

    #[test]
    fn shrinking_range_clamps_position() {
        let mut scrollbar = Scrollbar::default();
        scrollbar.set_range(400.0);
        scrollbar.set_position(300.0).expect("position");
        scrollbar.set_range(120.0);
        assert_eq!(scrollbar.position_px(), 120.0);
        assert!(scrollbar.is_scrolled_to_right_edge());
    }

    #[test]
    fn position_is_clamped_and_non_finite_is_rejected() {
        let mut scrollbar = Scrollbar::default();
        scrollbar.set_range(50.0);
        scrollbar.set_position(-10.0).expect("position");
        assert_eq!(scrollbar.position_px(), 0.0);
        scrollbar.set_position(99.0).expect("position");
        assert_eq!(scrollbar.position_px(), 50.0);
        assert!(scrollbar.set_position(f64::NAN).is_err());
        assert_eq!(scrollbar.position_px(), 50.0);
    }

    #[test]
    fn clamp_position_stays_in_range() {
        let mut scrollbar = Scrollbar::default();
        scrollbar.set_range(100.0);
        scrollbar.clamp_position(-5.0);
        assert_eq!(scrollbar.position_px(), 0.0);
        scrollbar.clamp_position(f64::NAN);
        assert_eq!(scrollbar.position_px(), 0.0);
        scrollbar.clamp_position(250.0);
        assert_eq!(scrollbar.position_px(), 100.0);
    }
}
