use serde::{Deserialize, Serialize};

use crate::shared::constants::{MAX_PRINT_QUANTITY, MIN_PRINT_QUANTITY};

/// Number of copies to print, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct PrintQuantity(u32);

impl PrintQuantity {
    /// Clamps `copies` into range.
    pub fn new(copies: u32) -> Self {
        Self(copies.clamp(MIN_PRINT_QUANTITY, MAX_PRINT_QUANTITY))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Applies a `+/-` step. A step that would leave the range is ignored
    /// rather than clamped.
    pub fn step(self, delta: i32) -> Self {
        let next = self.0 as i64 + delta as i64;
        if (MIN_PRINT_QUANTITY as i64..=MAX_PRINT_QUANTITY as i64).contains(&next) {
            Self(next as u32)
        } else {
            self
        }
    }
}

impl Default for PrintQuantity {
    fn default() -> Self {
        Self(MIN_PRINT_QUANTITY)
    }
}

impl From<u32> for PrintQuantity {
    fn from(copies: u32) -> Self {
        Self::new(copies)
    }
}

impl From<PrintQuantity> for u32 {
    fn from(q: PrintQuantity) -> Self {
        q.0
    }
}
