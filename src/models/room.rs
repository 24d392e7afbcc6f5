//! Room model.
//!
//! Rooms are the resources classes are assigned to. Each room has a
//! fixed capacity and can host at most one class per time slot.

use serde::{Deserialize, Serialize};

/// A room that can host classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Seating capacity (positive).
    pub size: i32,
}

impl Room {
    /// Creates a new room.
    pub fn new(name: impl Into<String>, size: i32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}
