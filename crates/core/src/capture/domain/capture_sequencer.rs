//! 3-2-1 countdown with two capture instants.
//!
//! Time is supplied by the caller, so every transition happens at a
//! deterministic offset from the start instant regardless of how often
//! `advance` is polled.

use std::time::Duration;

use crate::capture::domain::photo_slot::PhotoSlot;
use crate::shared::constants::{COUNTDOWN_START, COUNTDOWN_STEP, EARLY_CAPTURE_OFFSET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    /// Numeral currently on screen.
    Counting(u8),
    Captured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Numeral(u8),
    Capture(PhotoSlot),
    Completed,
}

pub struct CaptureSequencer {
    state: CaptureState,
    started_at: Option<Duration>,
    schedule: Vec<(Duration, CountdownEvent)>,
    emitted: usize,
}

impl CaptureSequencer {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            started_at: None,
            schedule: build_schedule(),
            emitted: 0,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Begins a countdown at `now`. Returns `false` without touching any
    /// state if one is already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.started_at = Some(now);
        self.emitted = 0;
        true
    }

    /// Emits, in order, every scheduled event due at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<CountdownEvent> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };

        let mut events = Vec::new();
        while let Some(&(offset, event)) = self.schedule.get(self.emitted) {
            if started_at + offset > now {
                break;
            }
            self.emitted += 1;
            self.apply(event);
            events.push(event);
            if event == CountdownEvent::Completed {
                break;
            }
        }
        events
    }

    /// Absolute instant of the next pending event.
    pub fn next_deadline(&self) -> Option<Duration> {
        let started_at = self.started_at?;
        self.schedule
            .get(self.emitted)
            .map(|&(offset, _)| started_at + offset)
    }

    fn apply(&mut self, event: CountdownEvent) {
        match event {
            CountdownEvent::Numeral(n) => self.state = CaptureState::Counting(n),
            CountdownEvent::Capture(PhotoSlot::Photo2) => self.state = CaptureState::Captured,
            CountdownEvent::Capture(PhotoSlot::Photo1) => {}
            CountdownEvent::Completed => {
                self.state = CaptureState::Idle;
                self.started_at = None;
                self.emitted = 0;
            }
        }
    }
}

impl Default for CaptureSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Offsets from the start instant, in emission order.
fn build_schedule() -> Vec<(Duration, CountdownEvent)> {
    let mut schedule = Vec::new();
    for (step, n) in (1..=COUNTDOWN_START).rev().enumerate() {
        schedule.push((COUNTDOWN_STEP * step as u32, CountdownEvent::Numeral(n)));
    }
    let last_numeral = COUNTDOWN_STEP * (COUNTDOWN_START as u32 - 1);
    let end = COUNTDOWN_STEP * COUNTDOWN_START as u32;
    schedule.push((
        last_numeral + EARLY_CAPTURE_OFFSET,
        CountdownEvent::Capture(PhotoSlot::Photo1),
    ));
    schedule.push((end, CountdownEvent::Capture(PhotoSlot::Photo2)));
    schedule.push((end, CountdownEvent::Completed));
    schedule
}
