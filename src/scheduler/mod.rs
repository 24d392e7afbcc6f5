//! CSP-based timetabling formulation.
//!
//! Bridges the timetabling domain models to the `csp` engine. Builds a
//! `CspModel` from classes and rooms, solves it with a `CspSolver`, and
//! decodes the satisfying assignment into a `Timetable`.
//!
//! # Formulation
//!
//! Three variables per class: the assigned room index, the assigned time
//! slot, and the capacity of the assigned room. The capacity variable is
//! coupled to the room choice by an element constraint and bounded below
//! by the class size; every pair of classes carries a tuple-disequality
//! constraint over their (room, slot) pairs so no room is double-booked.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling"

use std::error::Error;
use std::fmt;

use crate::csp::{
    BacktrackingSolver, CspModel, CspSolution, CspSolver, Domain, IntVar, SolverConfig,
    SolverStatus, VarId,
};
use crate::models::{Booking, Class, InvalidTimeSlot, Room, Timetable, DEFAULT_TIME_SLOTS};
use crate::validation::{validate_input, ValidationError};

/// Errors surfaced by the scheduling operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The solver proved that no assignment satisfies the constraints.
    /// Retrying with identical input cannot change the outcome.
    Infeasible,
    /// A decoded slot index has no entry in the label table — an internal
    /// inconsistency between the configured slot count and the table.
    InvalidTimeSlot {
        /// The out-of-range slot index.
        slot: usize,
    },
    /// The input failed eager validation; all detected problems included.
    InvalidInput(Vec<ValidationError>),
    /// A bounded solver configuration ran out of decisions before
    /// reaching a verdict. Distinct from [`ScheduleError::Infeasible`]:
    /// the instance may still be satisfiable.
    SearchBudgetExceeded,
    /// The constraint model was rejected by the solver. Unreachable for
    /// models produced by [`TimetableCspBuilder`].
    InvalidModel(String),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible => {
                write!(f, "no valid schedule exists for the given classes and rooms")
            }
            Self::InvalidTimeSlot { slot } => write!(f, "invalid time slot: {slot}"),
            Self::InvalidInput(errors) => {
                write!(f, "invalid input: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            Self::SearchBudgetExceeded => {
                write!(f, "search budget exceeded before reaching a verdict")
            }
            Self::InvalidModel(reason) => write!(f, "invalid constraint model: {reason}"),
        }
    }
}

impl Error for ScheduleError {}

impl From<InvalidTimeSlot> for ScheduleError {
    fn from(err: InvalidTimeSlot) -> Self {
        Self::InvalidTimeSlot { slot: err.slot }
    }
}

/// Builds a CSP model from timetabling domain objects.
///
/// Translates classes and rooms into a [`CspModel`] suitable for solving
/// with any [`CspSolver`] implementation, and decodes the resulting
/// assignment back into a [`Timetable`].
///
/// # Example
/// ```
/// use u_timetable::models::{Class, Room};
/// use u_timetable::scheduler::TimetableCspBuilder;
///
/// let classes = vec![Class::new("A", 20)];
/// let rooms = vec![Room::new("X", 50)];
/// let model = TimetableCspBuilder::new(&classes, &rooms).build();
/// assert_eq!(model.var_count(), 3);
/// ```
pub struct TimetableCspBuilder<'a> {
    classes: &'a [Class],
    rooms: &'a [Room],
    time_slots: usize,
}

impl<'a> TimetableCspBuilder<'a> {
    /// Creates a builder over the default scheduling day.
    pub fn new(classes: &'a [Class], rooms: &'a [Room]) -> Self {
        Self {
            classes,
            rooms,
            time_slots: DEFAULT_TIME_SLOTS,
        }
    }

    /// Overrides the number of time slots.
    pub fn with_time_slots(mut self, time_slots: usize) -> Self {
        self.time_slots = time_slots;
        self
    }

    /// Builds the CSP model.
    ///
    /// Creates, per class:
    /// - a room variable with domain `[0, |rooms|)`
    /// - a time variable with domain `[0, time_slots)`
    /// - a size variable ranging over the distinct room capacities,
    ///   coupled to the room variable by an element constraint and
    ///   bounded below by the class size
    ///
    /// and, per unordered pair of classes, a tuple-disequality constraint
    /// over their (room, time) pairs.
    ///
    /// Pure construction: no I/O, no errors. Unsatisfiability (including
    /// the empty-rooms case, which yields empty room domains) is a
    /// solve-time outcome.
    pub fn build(&self) -> CspModel {
        let mut model = CspModel::new("timetabling");
        let room_sizes: Vec<i64> = self.rooms.iter().map(|r| i64::from(r.size)).collect();

        let mut pairs: Vec<(VarId, VarId)> = Vec::with_capacity(self.classes.len());
        for class in self.classes {
            let room = model.add_var(IntVar::new(
                format!("{}_room", class.name),
                0,
                self.rooms.len() as i64 - 1,
            ));
            let time = model.add_var(IntVar::new(
                format!("{}_time", class.name),
                0,
                self.time_slots as i64 - 1,
            ));
            let size = model.add_var(IntVar::with_domain(
                format!("{}_size", class.name),
                Domain::from_values(room_sizes.clone()),
            ));

            // The assigned room determines the effective room size,
            // which must dominate the class size.
            model.add_element(room, room_sizes.clone(), size);
            model.add_at_least(size, i64::from(class.size));

            pairs.push((room, time));
        }

        // No two classes may occupy the same room in the same slot.
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                model.add_tuple_not_equal(pairs[i], pairs[j]);
            }
        }

        model
    }

    /// Builds the model, solves it, and decodes the result.
    pub fn solve<S: CspSolver>(
        &self,
        solver: &S,
        config: &SolverConfig,
    ) -> Result<Timetable, ScheduleError> {
        let model = self.build();
        let solution = solver.solve(&model, config);

        match solution.status {
            SolverStatus::Satisfiable => self.decode_solution(&solution),
            SolverStatus::Unsatisfiable => Err(ScheduleError::Infeasible),
            SolverStatus::BudgetExceeded => Err(ScheduleError::SearchBudgetExceeded),
            SolverStatus::ModelInvalid => Err(ScheduleError::InvalidModel(
                "solver rejected the generated model".into(),
            )),
        }
    }

    /// Decodes a satisfying assignment into a timetable.
    ///
    /// Reads each class's room and time variables back from the solution,
    /// resolves the room name by direct indexing, and emits bookings in
    /// class input order. The assignment itself is trusted — constraint
    /// semantics are the model's responsibility, not the decoder's.
    fn decode_solution(&self, solution: &CspSolution) -> Result<Timetable, ScheduleError> {
        let mut timetable = Timetable::new();

        for class in self.classes {
            let room_index = self.decoded_value(solution, &class.name, "room")?;
            let slot = self.decoded_value(solution, &class.name, "time")?;

            let room = self.rooms.get(room_index as usize).ok_or_else(|| {
                ScheduleError::InvalidModel(format!(
                    "room index {room_index} out of range for class '{}'",
                    class.name
                ))
            })?;

            timetable.add_booking(Booking::new(&class.name, &room.name, slot as usize));
        }

        Ok(timetable)
    }

    fn decoded_value(
        &self,
        solution: &CspSolution,
        class_name: &str,
        role: &str,
    ) -> Result<i64, ScheduleError> {
        solution
            .value(&format!("{class_name}_{role}"))
            .ok_or_else(|| {
                ScheduleError::InvalidModel(format!(
                    "missing {role} assignment for class '{class_name}'"
                ))
            })
    }
}

/// Schedules classes into rooms over the default eight-slot day.
///
/// Validates the input, builds the CSP model, solves it with the
/// backtracking solver, and returns the decoded timetable. Use
/// [`Timetable::render`] for the human-readable text.
///
/// # Errors
/// - [`ScheduleError::InvalidInput`] for duplicate names or non-positive sizes
/// - [`ScheduleError::Infeasible`] when no valid schedule exists
pub fn schedule(classes: &[Class], rooms: &[Room]) -> Result<Timetable, ScheduleError> {
    schedule_with(
        classes,
        rooms,
        DEFAULT_TIME_SLOTS,
        &BacktrackingSolver::new(),
        &SolverConfig::default(),
    )
}

/// Schedules with an explicit slot count, solver, and configuration.
pub fn schedule_with<S: CspSolver>(
    classes: &[Class],
    rooms: &[Room],
    time_slots: usize,
    solver: &S,
    config: &SolverConfig,
) -> Result<Timetable, ScheduleError> {
    validate_input(classes, rooms).map_err(ScheduleError::InvalidInput)?;
    TimetableCspBuilder::new(classes, rooms)
        .with_time_slots(time_slots)
        .solve(solver, config)
}
