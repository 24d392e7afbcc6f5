//! Time-slot configuration.
//!
//! The scheduling day is divided into fixed one-hour slots starting at
//! 08:00. The label table is process-wide fixed configuration: slot
//! indices are resolved against it when a timetable is rendered, and an
//! index outside the table indicates an internal inconsistency between
//! the configured slot count and the table, not bad user input.

use std::error::Error;
use std::fmt;

/// Number of time slots in the default scheduling day.
pub const DEFAULT_TIME_SLOTS: usize = 8;

/// Display labels for the default scheduling day, indexed by slot.
pub const SLOT_LABELS: [&str; DEFAULT_TIME_SLOTS] = [
    "08:00-09:00",
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
];

/// A slot index with no entry in the label table.
///
/// Only reachable when the configured slot count disagrees with
/// [`SLOT_LABELS`]; never caused by user input under correct
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTimeSlot {
    /// The out-of-range slot index.
    pub slot: usize,
}

impl fmt::Display for InvalidTimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time slot: {}", self.slot)
    }
}

impl Error for InvalidTimeSlot {}

/// Resolves a slot index to its display label.
pub fn slot_label(slot: usize) -> Result<&'static str, InvalidTimeSlot> {
    SLOT_LABELS.get(slot).copied().ok_or(InvalidTimeSlot { slot })
}
