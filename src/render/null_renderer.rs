use crate::error::ChartResult;
use crate::render::{LineRole, RenderFrame, Renderer};

/// Headless renderer for tests and for hosts that only need the geometry.
///
/// Frames are still validated so invalid geometry surfaces without a real
/// backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: u64,
    pub last_series_line_count: usize,
    pub last_grid_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered = self.frames_rendered.saturating_add(1);
        self.last_series_line_count = frame.lines_with_role(LineRole::Series).count();
        self.last_grid_line_count = frame.lines_with_role(LineRole::Grid).count();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
