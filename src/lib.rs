//! Room/time-slot timetabling for the U-Engine ecosystem.
//!
//! Assigns a fixed set of classes to rooms and hourly time slots such that
//! every class fits its room and no room is double-booked, by translating
//! the problem into a finite-domain constraint satisfaction problem (CSP)
//! and searching for a satisfying assignment.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Class`, `Room`, `Timetable`, `Booking`,
//!   and the fixed slot-label table
//! - **`validation`**: Input integrity checks (duplicate names, non-positive sizes)
//! - **`csp`**: Finite-domain engine — `Domain`, `IntVar`, `CspModel`,
//!   `Constraint`, the `CspSolver` trait, `BacktrackingSolver`
//! - **`scheduler`**: CSP formulation and extraction — `TimetableCspBuilder`,
//!   `ScheduleError`, `schedule`
//!
//! # Architecture
//!
//! The `scheduler` layer translates classes and rooms into a `CspModel`
//! (three coupled variables per class: room index, time slot, effective
//! room size), hands it to a `CspSolver`, and decodes the resulting
//! assignment into a `Timetable` — or reports infeasibility. The solver
//! sits behind a trait so alternative engines can be plugged in.
//!
//! # References
//!
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod csp;
pub mod models;
pub mod scheduler;
pub mod validation;
