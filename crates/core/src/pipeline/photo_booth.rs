use std::time::Duration;

use crate::camera::domain::camera::{Camera, StreamInfo};
use crate::capture::domain::capture_sequencer::{CaptureSequencer, CaptureState, CountdownEvent};
use crate::capture::domain::photo_slot::PhotoSlot;
use crate::capture::still_compositor::StillCompositor;
use crate::landmarks::domain::landmark_source::LandmarkSource;
use crate::overlay::domain::filter_variant::FilterVariant;
use crate::overlay::domain::primitive_renderer::PrimitiveRenderer;
use crate::pipeline::booth_error::BoothError;
use crate::pipeline::detection_loop::DetectionLoop;
use crate::pipeline::overlay_renderer::OverlayRenderer;
use crate::pipeline::print_flow::PrintFlow;
use crate::pipeline::session_state::SessionState;
use crate::printing::domain::print_quantity::PrintQuantity;
use crate::printing::domain::print_sink::PrintSink;
use crate::shared::frame::Frame;
use crate::shared::settings::BoothSettings;

/// The booth as a whole: live overlay, countdown, captures and printing.
///
/// Driven entirely by `tick(now)`; the caller owns the clock.
pub struct PhotoBooth {
    detection: DetectionLoop,
    sequencer: CaptureSequencer,
    compositor: StillCompositor,
    print_flow: PrintFlow,
    session: SessionState,
    numeral: Option<u8>,
}

impl PhotoBooth {
    pub fn new(
        camera: Box<dyn Camera>,
        landmarks: Box<dyn LandmarkSource>,
        renderer: Box<dyn PrimitiveRenderer>,
        sink: Box<dyn PrintSink>,
        settings: &BoothSettings,
    ) -> Self {
        Self {
            detection: DetectionLoop::new(camera, landmarks, OverlayRenderer::new(renderer)),
            sequencer: CaptureSequencer::new(),
            compositor: StillCompositor::default(),
            print_flow: PrintFlow::new(
                Box::new(settings.print_surface()),
                sink,
                settings.print_settle(),
            ),
            session: SessionState::new(settings),
            numeral: None,
        }
    }

    /// Acquires the camera. On failure the booth stays unable to capture.
    pub fn start(&mut self) -> Result<StreamInfo, BoothError> {
        self.detection.start().map_err(|e| {
            log::error!("Camera unavailable: {e}");
            BoothError::CameraAccess(e)
        })
    }

    pub fn stop(&mut self) {
        self.detection.stop();
    }

    pub fn is_running(&self) -> bool {
        self.detection.is_running()
    }

    /// One frame of booth time: redraw the overlay, fire due countdown
    /// events, and hand settled print jobs to the printer.
    pub fn tick(&mut self, now: Duration) -> Vec<CountdownEvent> {
        self.detection.tick(self.session.filter());

        let events = self.sequencer.advance(now);
        for &event in &events {
            match event {
                CountdownEvent::Numeral(n) => {
                    self.numeral = Some(n);
                    log::debug!("Countdown {n}");
                }
                CountdownEvent::Capture(slot) => {
                    if let Err(e) = self.capture(slot, now) {
                        log::warn!("Capture of {slot} failed: {e}");
                    }
                }
                CountdownEvent::Completed => {
                    self.numeral = None;
                    self.session.finish_capture();
                    log::info!("Countdown complete, printing unlocked");
                }
            }
        }

        self.print_flow.tick(now);
        events
    }

    /// Returns `false` if a countdown is already running or the camera is
    /// not live.
    pub fn start_countdown(&mut self, now: Duration) -> bool {
        if !self.detection.is_running() {
            log::warn!("Countdown ignored: camera is not running");
            return false;
        }
        if !self.sequencer.start(now) {
            return false;
        }
        self.session.begin_capture();
        log::info!("Countdown started");
        true
    }

    pub fn select_filter(&mut self, filter: FilterVariant) {
        if filter != self.session.filter() {
            log::info!("Filter changed to {filter}");
        }
        self.session.set_filter(filter);
    }

    pub fn select_filter_index(&mut self, index: usize) -> Result<FilterVariant, BoothError> {
        let filter = FilterVariant::from_index(index).ok_or(BoothError::UnknownFilter(index))?;
        self.select_filter(filter);
        Ok(filter)
    }

    pub fn adjust_print_quantity(&mut self, delta: i32) -> PrintQuantity {
        self.session.step_print_quantity(delta)
    }

    pub fn set_print_quantity(&mut self, copies: u32) -> PrintQuantity {
        self.session.set_print_quantity(copies)
    }

    pub fn select_and_print(&mut self, slot: PhotoSlot, now: Duration) -> Result<(), BoothError> {
        if !self.session.is_print_unlocked() {
            return Err(BoothError::PrintLocked);
        }
        self.print_flow.select(&self.session, slot, now)
    }

    /// Numeral currently on screen, if any.
    pub fn numeral(&self) -> Option<u8> {
        self.numeral
    }

    pub fn capture_state(&self) -> CaptureState {
        self.sequencer.state()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn overlay_frame(&self) -> &Frame {
        self.detection.overlay_frame()
    }

    pub fn print_flow(&self) -> &PrintFlow {
        &self.print_flow
    }

    /// Back to a fresh session; the camera stays as it was.
    pub fn reset(&mut self) {
        self.sequencer = CaptureSequencer::new();
        self.print_flow.clear();
        self.session.reset();
        self.numeral = None;
    }

    fn capture(&mut self, slot: PhotoSlot, now: Duration) -> Result<(), BoothError> {
        let video = self.detection.video_frame().ok_or(BoothError::NoFrame)?;
        let still = self
            .compositor
            .compose(video, self.detection.overlay_frame(), slot, now)?;
        log::info!("Captured {slot} ({} bytes)", still.png().len());
        self.session.store(still);
        Ok(())
    }
}
