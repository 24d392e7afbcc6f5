//! Finite-domain constraint satisfaction engine.
//!
//! Provides a small CSP modeling layer and a complete backtracking
//! solver with constraint propagation.
//!
//! # Key Components
//!
//! - **Variables**: [`IntVar`], [`Domain`] — finite-domain decision variables
//! - **Constraints**: [`Constraint`] — Element, TupleNotEqual, AtLeast
//! - **Model**: [`CspModel`] — container for variables and constraints
//! - **Solver**: [`CspSolver`] trait and [`BacktrackingSolver`]
//!
//! # Design
//!
//! The constraint forms are exactly those the timetabling formulation
//! needs: an array-indexed lookup coupling a discrete choice to a derived
//! value, pairwise tuple disequality for mutual exclusion, and a lower
//! bound. The solver interleaves minimum-remaining-values search with
//! propagation to a fixpoint, and is complete over finite domains: it
//! reports unsatisfiability only after exhausting the space.
//!
//! The [`CspSolver`] trait keeps the engine swappable — consumers depend
//! on the two-outcome solve contract, not on this implementation.
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod model;
mod solver;
mod variables;

pub use model::{Constraint, CspModel, VarId};
pub use solver::{BacktrackingSolver, CspSolution, CspSolver, SolverConfig, SolverStatus};
pub use variables::{Domain, IntVar};
