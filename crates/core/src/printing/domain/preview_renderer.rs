use crate::capture::domain::captured_still::CapturedStill;
use crate::shared::frame::Frame;

/// Renders a still into the print-preview surface.
pub trait PreviewRenderer: Send {
    fn render(&self, still: &CapturedStill) -> Result<Frame, image::ImageError>;
}
