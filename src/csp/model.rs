//! CSP model definition.

use serde::{Deserialize, Serialize};

use super::variables::IntVar;

/// Index of a variable within a [`CspModel`].
pub type VarId = usize;

/// A constraint over finite-domain integer variables.
///
/// These are the generic constraint forms the timetabling formulation is
/// built from; they carry no domain-specific meaning of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// Array-indexed lookup: `result = table[index]`.
    ///
    /// Couples a discrete choice variable to a derived value, e.g. a room
    /// choice to that room's capacity.
    Element {
        /// The index variable.
        index: VarId,
        /// The lookup table; every value in `index`'s domain must be a
        /// valid index into it.
        table: Vec<i64>,
        /// The derived value variable.
        result: VarId,
    },

    /// Tuple disequality: `(left.0, left.1) != (right.0, right.1)`.
    ///
    /// The two pairs must differ in at least one coordinate. This is the
    /// mutual-exclusion form: two classes may share a room or a slot, but
    /// not both.
    TupleNotEqual {
        left: (VarId, VarId),
        right: (VarId, VarId),
    },

    /// Lower bound: `var >= bound`.
    AtLeast {
        /// The constrained variable.
        var: VarId,
        /// The minimum admissible value.
        bound: i64,
    },
}

/// A constraint satisfaction model.
///
/// Contains variables (with their initial domains) and constraints.
/// Domain membership itself encodes the range constraints: a variable
/// created with domain `[0, n)` can never take a value outside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CspModel {
    /// Model name.
    pub name: String,
    /// Decision variables, addressed by [`VarId`].
    pub vars: Vec<IntVar>,
    /// Constraints over the variables.
    pub constraints: Vec<Constraint>,
}

impl CspModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Adds a variable, returning its id.
    pub fn add_var(&mut self, var: IntVar) -> VarId {
        self.vars.push(var);
        self.vars.len() - 1
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add an element constraint `result = table[index]`.
    pub fn add_element(&mut self, index: VarId, table: Vec<i64>, result: VarId) {
        self.constraints.push(Constraint::Element {
            index,
            table,
            result,
        });
    }

    /// Convenience: add a tuple disequality constraint.
    pub fn add_tuple_not_equal(&mut self, left: (VarId, VarId), right: (VarId, VarId)) {
        self.constraints.push(Constraint::TupleNotEqual { left, right });
    }

    /// Convenience: add a lower-bound constraint `var >= bound`.
    pub fn add_at_least(&mut self, var: VarId, bound: i64) {
        self.constraints.push(Constraint::AtLeast { var, bound });
    }

    /// Validates the model for referential consistency.
    ///
    /// Checks that every constraint references existing variables and
    /// that element-constraint index domains stay within their tables.
    /// An unsatisfiable model is still a valid model — emptiness of a
    /// domain is a solve-time outcome, not a structural defect.
    pub fn validate(&self) -> Result<(), String> {
        let check = |id: VarId| -> Result<(), String> {
            if id < self.vars.len() {
                Ok(())
            } else {
                Err(format!("undefined variable id: {id}"))
            }
        };

        for constraint in &self.constraints {
            match constraint {
                Constraint::Element {
                    index,
                    table,
                    result,
                } => {
                    check(*index)?;
                    check(*result)?;
                    for value in self.vars[*index].domain.iter() {
                        if value < 0 || value as usize >= table.len() {
                            return Err(format!(
                                "element index value {value} outside table of length {}",
                                table.len()
                            ));
                        }
                    }
                }
                Constraint::TupleNotEqual { left, right } => {
                    check(left.0)?;
                    check(left.1)?;
                    check(right.0)?;
                    check(right.1)?;
                }
                Constraint::AtLeast { var, .. } => {
                    check(*var)?;
                }
            }
        }
        Ok(())
    }

    /// Looks up a variable id by name.
    pub fn var_id(&self, name: &str) -> Option<VarId> {
        self.vars.iter().position(|v| v.name == name)
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
