use std::collections::HashMap;

use crate::capture::domain::captured_still::CapturedStill;
use crate::capture::domain::photo_slot::PhotoSlot;
use crate::overlay::domain::filter_variant::FilterVariant;
use crate::printing::domain::print_quantity::PrintQuantity;
use crate::shared::settings::BoothSettings;

/// Everything one visitor's session accumulates.
///
/// Owned by the booth controller; `reset` returns it to the values it
/// was created with.
#[derive(Debug, Clone)]
pub struct SessionState {
    stills: HashMap<PhotoSlot, CapturedStill>,
    capturing: bool,
    filter: FilterVariant,
    print_unlocked: bool,
    print_quantity: PrintQuantity,
    initial_filter: FilterVariant,
    initial_quantity: PrintQuantity,
}

impl SessionState {
    pub fn new(settings: &BoothSettings) -> Self {
        Self {
            stills: HashMap::new(),
            capturing: false,
            filter: settings.filter,
            print_unlocked: false,
            print_quantity: settings.print_quantity,
            initial_filter: settings.filter,
            initial_quantity: settings.print_quantity,
        }
    }

    pub fn reset(&mut self) {
        self.stills.clear();
        self.capturing = false;
        self.filter = self.initial_filter;
        self.print_unlocked = false;
        self.print_quantity = self.initial_quantity;
    }

    /// Replaces whatever the slot held.
    pub fn store(&mut self, still: CapturedStill) {
        self.stills.insert(still.slot(), still);
    }

    pub fn still(&self, slot: PhotoSlot) -> Option<&CapturedStill> {
        self.stills.get(&slot)
    }

    pub fn still_count(&self) -> usize {
        self.stills.len()
    }

    pub fn filter(&self) -> FilterVariant {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FilterVariant) {
        self.filter = filter;
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn begin_capture(&mut self) {
        self.capturing = true;
    }

    /// Ends the countdown and unlocks printing for the rest of the session.
    pub fn finish_capture(&mut self) {
        self.capturing = false;
        self.print_unlocked = true;
    }

    pub fn is_print_unlocked(&self) -> bool {
        self.print_unlocked
    }

    pub fn print_quantity(&self) -> PrintQuantity {
        self.print_quantity
    }

    pub fn step_print_quantity(&mut self, delta: i32) -> PrintQuantity {
        self.print_quantity = self.print_quantity.step(delta);
        self.print_quantity
    }

    pub fn set_print_quantity(&mut self, copies: u32) -> PrintQuantity {
        self.print_quantity = PrintQuantity::new(copies);
        self.print_quantity
    }
}
