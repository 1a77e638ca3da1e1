use crate::overlay::domain::primitive::DrawPrimitive;
use crate::shared::frame::Frame;

/// Domain interface for painting drawing primitives onto an RGBA surface.
///
/// Implementations blend in-place (`&mut Frame`) in list order.
pub trait PrimitiveRenderer: Send {
    fn render(
        &self,
        surface: &mut Frame,
        primitives: &[DrawPrimitive],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
