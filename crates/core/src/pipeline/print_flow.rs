use std::collections::VecDeque;
use std::time::Duration;

use crate::capture::domain::photo_slot::PhotoSlot;
use crate::pipeline::booth_error::BoothError;
use crate::pipeline::session_state::SessionState;
use crate::printing::domain::preview_renderer::PreviewRenderer;
use crate::printing::domain::print_sink::{PrintJob, PrintSink};

/// Turns a selected still into a print job and hands it to the sink after
/// the preview has had time to settle.
pub struct PrintFlow {
    preview: Box<dyn PreviewRenderer>,
    sink: Box<dyn PrintSink>,
    settle: Duration,
    pending: VecDeque<(Duration, PrintJob)>,
}

impl PrintFlow {
    pub fn new(preview: Box<dyn PreviewRenderer>, sink: Box<dyn PrintSink>, settle: Duration) -> Self {
        Self {
            preview,
            sink,
            settle,
            pending: VecDeque::new(),
        }
    }

    /// Renders the preview for `slot` and schedules it for `now + settle`.
    ///
    /// An empty slot fails before any rendering happens.
    pub fn select(
        &mut self,
        session: &SessionState,
        slot: PhotoSlot,
        now: Duration,
    ) -> Result<(), BoothError> {
        let still = session
            .still(slot)
            .ok_or(BoothError::NoPhotoAvailable(slot))?;
        let preview = self.preview.render(still).map_err(BoothError::Preview)?;
        let job = PrintJob {
            slot,
            preview,
            quantity: session.print_quantity(),
        };
        log::info!(
            "Print of {slot} queued: {} copies, {}x{} preview",
            job.quantity.get(),
            job.preview.width(),
            job.preview.height()
        );
        self.pending.push_back((now + self.settle, job));
        Ok(())
    }

    /// Submits every job whose settle delay has elapsed. Returns how many
    /// were handed to the sink; failures are logged, not retried.
    pub fn tick(&mut self, now: Duration) -> usize {
        let mut sent = 0;
        while let Some((due, _)) = self.pending.front() {
            if *due > now {
                break;
            }
            let Some((_, job)) = self.pending.pop_front() else {
                break;
            };
            sent += 1;
            if let Err(e) = self.sink.print(&job) {
                log::warn!("Print of {} failed: {e}", job.slot);
            }
        }
        sent
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
