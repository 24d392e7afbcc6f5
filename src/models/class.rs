//! Class model.
//!
//! A class is a unit of teaching that must be placed into exactly one
//! room and one time slot. Classes are immutable once constructed.

use serde::{Deserialize, Serialize};

use super::Room;

/// A class to be timetabled.
///
/// The name doubles as the unique identifier; the size is the number of
/// attendees and must fit within the capacity of whichever room the
/// class is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Unique class name.
    pub name: String,
    /// Number of attendees (positive).
    pub size: i32,
}

impl Class {
    /// Creates a new class.
    pub fn new(name: impl Into<String>, size: i32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Whether this class fits within the given room's capacity.
    pub fn fits_in(&self, room: &Room) -> bool {
        self.size <= room.size
    }
}
