//! Timetabling domain models.
//!
//! Provides the core data types for representing timetabling problems
//! and solutions: the classes to place, the rooms that host them, the
//! fixed slot table that defines the scheduling day, and the resulting
//! timetable.

mod class;
mod room;
mod slots;
mod timetable;

pub use class::Class;
pub use room::Room;
pub use slots::{slot_label, InvalidTimeSlot, DEFAULT_TIME_SLOTS, SLOT_LABELS};
pub use timetable::{Booking, Timetable};
