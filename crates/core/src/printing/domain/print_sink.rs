use crate::capture::domain::photo_slot::PhotoSlot;
use crate::printing::domain::print_quantity::PrintQuantity;
use crate::shared::frame::Frame;

/// A rendered print preview ready to hand to the printer.
#[derive(Clone, Debug)]
pub struct PrintJob {
    pub slot: PhotoSlot,
    pub preview: Frame,
    pub quantity: PrintQuantity,
}

/// Domain interface for the platform print mechanism.
///
/// Fire-and-forget: the caller logs failures and never retries.
pub trait PrintSink: Send {
    fn print(&mut self, job: &PrintJob) -> Result<(), Box<dyn std::error::Error>>;
}
