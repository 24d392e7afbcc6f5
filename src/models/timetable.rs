//! Timetable (solution) model.
//!
//! A timetable is a complete assignment of classes to rooms and time
//! slots. It is derived data produced by the scheduler — it has no
//! lifecycle beyond the call that created it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::slots::{slot_label, InvalidTimeSlot};

/// A complete timetable (solution to a timetabling problem).
///
/// Bookings are kept in class input order, so rendered output is stable
/// regardless of which particular satisfying assignment the solver found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Class-room-slot bookings, in class input order.
    pub bookings: Vec<Booking>,
}

/// A class-room-slot booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booked class name.
    pub class_name: String,
    /// Assigned room name.
    pub room_name: String,
    /// Assigned time slot index.
    pub slot: usize,
}

impl Booking {
    /// Creates a new booking.
    pub fn new(
        class_name: impl Into<String>,
        room_name: impl Into<String>,
        slot: usize,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            room_name: room_name.into(),
            slot,
        }
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a booking.
    pub fn add_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Number of bookings.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    /// Finds the booking for a given class.
    pub fn booking_for_class(&self, class_name: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.class_name == class_name)
    }

    /// Returns all bookings in a given room.
    pub fn bookings_for_room(&self, room_name: &str) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.room_name == room_name)
            .collect()
    }

    /// Returns all bookings in a given time slot.
    pub fn bookings_in_slot(&self, slot: usize) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.slot == slot).collect()
    }

    /// Whether no two bookings share the same (room, slot) pair.
    pub fn is_conflict_free(&self) -> bool {
        let mut seen = HashSet::new();
        self.bookings
            .iter()
            .all(|b| seen.insert((b.room_name.as_str(), b.slot)))
    }

    /// Renders the timetable as human-readable text.
    ///
    /// One line per class, in class input order:
    /// `Class <name> is in room <room name> at <start>-<end>`.
    ///
    /// Fails with [`InvalidTimeSlot`] if a booking's slot has no entry in
    /// the label table.
    pub fn render(&self) -> Result<String, InvalidTimeSlot> {
        let mut lines = Vec::with_capacity(self.bookings.len());
        for booking in &self.bookings {
            let label = slot_label(booking.slot)?;
            lines.push(format!(
                "Class {} is in room {} at {}",
                booking.class_name, booking.room_name, label
            ));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_booking(Booking::new("A", "X", 0));
        t.add_booking(Booking::new("B", "Y", 0));
        t.add_booking(Booking::new("C", "X", 1));
        t
    }

    #[test]
    fn test_booking_for_class() {
        let t = sample_timetable();
        let b = t.booking_for_class("B").unwrap();
        assert_eq!(b.room_name, "Y");
        assert_eq!(b.slot, 0);
        assert!(t.booking_for_class("Z").is_none());
    }

    #[test]
    fn test_bookings_for_room() {
        let t = sample_timetable();
        assert_eq!(t.bookings_for_room("X").len(), 2);
        assert_eq!(t.bookings_for_room("Y").len(), 1);
        assert!(t.bookings_for_room("W").is_empty());
    }

    #[test]
    fn test_bookings_in_slot() {
        let t = sample_timetable();
        assert_eq!(t.bookings_in_slot(0).len(), 2);
        assert_eq!(t.bookings_in_slot(1).len(), 1);
        assert!(t.bookings_in_slot(7).is_empty());
    }

    #[test]
    fn test_conflict_free() {
        let t = sample_timetable();
        assert!(t.is_conflict_free());

        let mut clash = sample_timetable();
        clash.add_booking(Booking::new("D", "X", 0)); // X@0 already taken by A
        assert!(!clash.is_conflict_free());
    }

    #[test]
    fn test_render() {
        let t = sample_timetable();
        let text = t.render().unwrap();
        assert_eq!(
            text,
            "Class A is in room X at 08:00-09:00\n\
             Class B is in room Y at 08:00-09:00\n\
             Class C is in room X at 09:00-10:00"
        );
    }

    #[test]
    fn test_render_preserves_input_order() {
        // Bookings are not sorted by room or slot on output.
        let mut t = Timetable::new();
        t.add_booking(Booking::new("late", "X", 7));
        t.add_booking(Booking::new("early", "X", 0));
        let text = t.render().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Class late"));
        assert!(lines[1].starts_with("Class early"));
    }

    #[test]
    fn test_render_invalid_slot() {
        let mut t = Timetable::new();
        t.add_booking(Booking::new("A", "X", 99));
        let err = t.render().unwrap_err();
        assert_eq!(err.slot, 99);
    }

    #[test]
    fn test_render_empty() {
        let t = Timetable::new();
        assert_eq!(t.render().unwrap(), "");
    }

    #[test]
    fn test_json_export() {
        let t = sample_timetable();
        let json = serde_json::to_string(&t).unwrap();
        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.booking_count(), 3);
        assert_eq!(back.booking_for_class("A").unwrap().room_name, "X");
    }
}
