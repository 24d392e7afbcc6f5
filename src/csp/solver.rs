//! CSP solver interface and backtracking implementation.

use std::collections::{HashMap, HashSet};

use super::model::{Constraint, CspModel, VarId};
use super::variables::Domain;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// A satisfying assignment was found.
    Satisfiable,
    /// No satisfying assignment exists.
    Unsatisfiable,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// Solver exhausted its decision budget before reaching an answer.
    BudgetExceeded,
}

/// Solution from a CSP solver.
#[derive(Debug, Clone)]
pub struct CspSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Variable assignments by name (complete iff satisfiable).
    pub values: HashMap<String, i64>,
    /// Number of value assignments tried during search.
    pub decisions: u64,
}

impl CspSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            values: HashMap::new(),
            decisions: 0,
        }
    }

    /// Whether a satisfying assignment was found.
    pub fn is_satisfiable(&self) -> bool {
        self.status == SolverStatus::Satisfiable
    }

    /// Returns the assigned value of a variable, by name.
    pub fn value(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Maximum number of decisions before giving up. `None` = unbounded,
    /// which keeps the solver's answer a definitive two-outcome verdict.
    pub max_decisions: Option<u64>,
}

impl SolverConfig {
    /// Unbounded configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with a decision budget.
    pub fn bounded(max_decisions: u64) -> Self {
        Self {
            max_decisions: Some(max_decisions),
        }
    }
}

/// Trait for CSP solver implementations.
///
/// Implementors provide the actual constraint solving logic. The
/// contract: given a valid model, return either a complete satisfying
/// assignment or a definitive unsatisfiability verdict (budget
/// exhaustion being the only other outcome, and only for bounded
/// configurations).
pub trait CspSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &CspModel, config: &SolverConfig) -> CspSolution;
}

/// Chronological backtracking solver with constraint propagation.
///
/// # Algorithm
///
/// 1. Propagate all constraints to a fixpoint (element, lower-bound,
///    and tuple-disequality revision), pruning domains, then run a
///    pigeonhole check over pairwise-constrained tuple groups.
/// 2. Pick the unfixed variable with the fewest remaining values
///    (minimum remaining values; ties broken by lowest variable id).
/// 3. Try its values in ascending order; recurse after each assignment.
/// 4. Backtrack on domain wipeout; report unsatisfiable only after
///    exhausting the search space.
///
/// The solver is fully deterministic: identical models always produce
/// the identical outcome, and when satisfiable, the identical
/// assignment.
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BacktrackingSolver {
    fn default() -> Self {
        Self::new()
    }
}

enum SearchOutcome {
    Found(Vec<i64>),
    Exhausted,
    OutOfBudget,
}

impl CspSolver for BacktrackingSolver {
    fn solve(&self, model: &CspModel, config: &SolverConfig) -> CspSolution {
        if model.validate().is_err() {
            return CspSolution::empty(SolverStatus::ModelInvalid);
        }

        let mut domains: Vec<Domain> = model.vars.iter().map(|v| v.domain.clone()).collect();
        let mut decisions = 0;

        if !propagate(&model.constraints, &mut domains) {
            return CspSolution {
                status: SolverStatus::Unsatisfiable,
                values: HashMap::new(),
                decisions,
            };
        }

        match search(&model.constraints, &domains, config, &mut decisions) {
            SearchOutcome::Found(values) => CspSolution {
                status: SolverStatus::Satisfiable,
                values: model
                    .vars
                    .iter()
                    .map(|v| v.name.clone())
                    .zip(values)
                    .collect(),
                decisions,
            },
            SearchOutcome::Exhausted => CspSolution {
                status: SolverStatus::Unsatisfiable,
                values: HashMap::new(),
                decisions,
            },
            SearchOutcome::OutOfBudget => CspSolution {
                status: SolverStatus::BudgetExceeded,
                values: HashMap::new(),
                decisions,
            },
        }
    }
}

/// Depth-first search over the remaining domains.
fn search(
    constraints: &[Constraint],
    domains: &[Domain],
    config: &SolverConfig,
    decisions: &mut u64,
) -> SearchOutcome {
    // Minimum remaining values; ties fall to the lowest variable id.
    let target = domains
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.is_fixed())
        .min_by_key(|(_, d)| d.len())
        .map(|(id, _)| id);

    let Some(var) = target else {
        // All variables fixed and mutually consistent.
        return SearchOutcome::Found(domains.iter().filter_map(Domain::value).collect());
    };

    for value in domains[var].values().to_vec() {
        *decisions += 1;
        if let Some(max) = config.max_decisions {
            if *decisions > max {
                return SearchOutcome::OutOfBudget;
            }
        }

        let mut child = domains.to_vec();
        child[var] = Domain::singleton(value);
        if !propagate(constraints, &mut child) {
            continue;
        }
        match search(constraints, &child, config, decisions) {
            SearchOutcome::Exhausted => continue,
            outcome => return outcome,
        }
    }

    SearchOutcome::Exhausted
}

/// Revises every constraint until no domain changes.
///
/// Returns `false` on domain wipeout (the current branch admits no
/// solution).
fn propagate(constraints: &[Constraint], domains: &mut [Domain]) -> bool {
    loop {
        if domains.iter().any(Domain::is_empty) {
            return false;
        }

        let mut changed = false;
        for constraint in constraints {
            match constraint {
                Constraint::AtLeast { var, bound } => {
                    changed |= domains[*var].retain(|v| v >= *bound);
                }
                Constraint::Element {
                    index,
                    table,
                    result,
                } => {
                    // Index values must map to a still-admissible result.
                    let results = domains[*result].clone();
                    changed |= domains[*index].retain(|j| results.contains(table[j as usize]));
                    // Result values must be witnessed by some index value.
                    let indices = domains[*index].clone();
                    changed |= domains[*result]
                        .retain(|v| indices.iter().any(|j| table[j as usize] == v));
                }
                Constraint::TupleNotEqual { left, right } => {
                    changed |= revise_tuple_not_equal(*left, *right, domains);
                }
            }
        }

        if !changed {
            return tuple_groups_consistent(constraints, domains);
        }
    }
}

/// Pigeonhole check over cliques of tuple-disequality constraints.
///
/// Tuples that are pairwise constrained and fixed to the same value on
/// one coordinate must take pairwise-distinct values on the other, so
/// the union of their remaining domains there must be at least as large
/// as the group. Catches overfull groups (e.g. more classes forced into
/// a room than it has slots) as soon as the last member is fixed,
/// instead of after exhausting every value permutation.
///
/// Detection only — no domains are changed.
fn tuple_groups_consistent(constraints: &[Constraint], domains: &[Domain]) -> bool {
    let mut tuples: Vec<(VarId, VarId)> = Vec::new();
    let mut constrained: HashSet<(usize, usize)> = HashSet::new();

    for constraint in constraints {
        if let Constraint::TupleNotEqual { left, right } = constraint {
            let l = tuple_index(&mut tuples, *left);
            let r = tuple_index(&mut tuples, *right);
            constrained.insert((l.min(r), l.max(r)));
        }
    }

    coordinate_fit(&tuples, &constrained, domains, false)
        && coordinate_fit(&tuples, &constrained, domains, true)
}

fn tuple_index(tuples: &mut Vec<(VarId, VarId)>, tuple: (VarId, VarId)) -> usize {
    match tuples.iter().position(|&t| t == tuple) {
        Some(i) => i,
        None => {
            tuples.push(tuple);
            tuples.len() - 1
        }
    }
}

/// Groups tuples fixed to the same value on one coordinate (`swapped`
/// selects which) and checks that each pairwise-constrained group fits
/// within the union of its free-coordinate domains.
fn coordinate_fit(
    tuples: &[(VarId, VarId)],
    constrained: &HashSet<(usize, usize)>,
    domains: &[Domain],
    swapped: bool,
) -> bool {
    let project = |t: &(VarId, VarId)| if swapped { (t.1, t.0) } else { (t.0, t.1) };

    let mut groups: HashMap<i64, Vec<usize>> = HashMap::new();
    for (i, tuple) in tuples.iter().enumerate() {
        let (fixed_var, _) = project(tuple);
        if let Some(value) = domains[fixed_var].value() {
            groups.entry(value).or_default().push(i);
        }
    }

    for group in groups.values() {
        if group.len() < 2 {
            continue;
        }
        // The distinctness argument needs every pair in the group to be
        // directly constrained.
        let pairwise = group.iter().enumerate().all(|(k, &i)| {
            group[k + 1..]
                .iter()
                .all(|&j| constrained.contains(&(i.min(j), i.max(j))))
        });
        if !pairwise {
            continue;
        }

        let mut free_values = HashSet::new();
        for &i in group {
            let (_, free_var) = project(&tuples[i]);
            free_values.extend(domains[free_var].iter());
        }
        if free_values.len() < group.len() {
            return false;
        }
    }

    true
}

/// Prunes one tuple-disequality constraint.
///
/// When one coordinate pair is forced equal, the other pair must differ,
/// so a fixed value on either side is removed from the opposite domain.
fn revise_tuple_not_equal(
    (a1, a2): (VarId, VarId),
    (b1, b2): (VarId, VarId),
    domains: &mut [Domain],
) -> bool {
    let mut changed = false;

    if forced_equal(&domains[a1], &domains[b1]) {
        changed |= prune_equality(a2, b2, domains);
    }
    if forced_equal(&domains[a2], &domains[b2]) {
        changed |= prune_equality(a1, b1, domains);
    }

    changed
}

fn forced_equal(x: &Domain, y: &Domain) -> bool {
    matches!((x.value(), y.value()), (Some(a), Some(b)) if a == b)
}

fn prune_equality(x: VarId, y: VarId, domains: &mut [Domain]) -> bool {
    if let Some(v) = domains[x].value() {
        domains[y].remove(v)
    } else if let Some(v) = domains[y].value() {
        domains[x].remove(v)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::IntVar;

    #[test]
    fn test_all_fixed_model() {
        let mut model = CspModel::new("test");
        model.add_var(IntVar::fixed("x", 3));
        model.add_var(IntVar::fixed("y", 4));

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_satisfiable());
        assert_eq!(solution.value("x"), Some(3));
        assert_eq!(solution.value("y"), Some(4));
    }

    #[test]
    fn test_empty_model_is_satisfiable() {
        let model = CspModel::new("empty");
        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_satisfiable());
        assert!(solution.values.is_empty());
    }

    #[test]
    fn test_empty_domain_is_unsatisfiable() {
        let mut model = CspModel::new("test");
        model.add_var(IntVar::new("impossible", 0, -1));

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Unsatisfiable);
    }

    #[test]
    fn test_at_least_prunes() {
        let mut model = CspModel::new("test");
        let x = model.add_var(IntVar::new("x", 0, 10));
        model.add_at_least(x, 8);

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_satisfiable());
        assert!(solution.value("x").is_some_and(|v| v >= 8));
    }

    #[test]
    fn test_at_least_unsatisfiable() {
        let mut model = CspModel::new("test");
        let x = model.add_var(IntVar::new("x", 0, 10));
        model.add_at_least(x, 11);

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Unsatisfiable);
    }

    #[test]
    fn test_element_couples_index_and_result() {
        let mut model = CspModel::new("test");
        let index = model.add_var(IntVar::new("index", 0, 2));
        let result = model.add_var(IntVar::new("result", 0, 100));
        model.add_element(index, vec![50, 20, 35], result);
        model.add_at_least(result, 40);

        // Only table[0] = 50 satisfies the bound.
        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_satisfiable());
        assert_eq!(solution.value("index"), Some(0));
        assert_eq!(solution.value("result"), Some(50));
    }

    #[test]
    fn test_element_unsatisfiable_bound() {
        let mut model = CspModel::new("test");
        let index = model.add_var(IntVar::new("index", 0, 2));
        let result = model.add_var(IntVar::new("result", 0, 100));
        model.add_element(index, vec![50, 20, 35], result);
        model.add_at_least(result, 51);

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Unsatisfiable);
    }

    #[test]
    fn test_tuple_not_equal_forces_difference() {
        // Two tuples over single-value coordinates except one free slot.
        let mut model = CspModel::new("test");
        let a1 = model.add_var(IntVar::fixed("a1", 0));
        let a2 = model.add_var(IntVar::fixed("a2", 0));
        let b1 = model.add_var(IntVar::fixed("b1", 0));
        let b2 = model.add_var(IntVar::new("b2", 0, 1));
        model.add_tuple_not_equal((a1, a2), (b1, b2));

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_satisfiable());
        // b2 = 0 would duplicate the (0, 0) tuple.
        assert_eq!(solution.value("b2"), Some(1));
    }

    #[test]
    fn test_tuple_not_equal_unsatisfiable() {
        let mut model = CspModel::new("test");
        let a1 = model.add_var(IntVar::fixed("a1", 2));
        let a2 = model.add_var(IntVar::fixed("a2", 5));
        let b1 = model.add_var(IntVar::fixed("b1", 2));
        let b2 = model.add_var(IntVar::fixed("b2", 5));
        model.add_tuple_not_equal((a1, a2), (b1, b2));

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Unsatisfiable);
    }

    #[test]
    fn test_tuple_not_equal_allows_shared_coordinate() {
        // Same first coordinate, different second coordinate: allowed.
        let mut model = CspModel::new("test");
        let a1 = model.add_var(IntVar::fixed("a1", 2));
        let a2 = model.add_var(IntVar::fixed("a2", 5));
        let b1 = model.add_var(IntVar::fixed("b1", 2));
        let b2 = model.add_var(IntVar::fixed("b2", 6));
        model.add_tuple_not_equal((a1, a2), (b1, b2));

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_satisfiable());
    }

    #[test]
    fn test_invalid_model() {
        let mut model = CspModel::new("test");
        model.add_at_least(42, 0);

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::ModelInvalid);
    }

    #[test]
    fn test_overfull_group_detected_without_search() {
        // Pigeonhole: 3 mutually-distinct tuples over a 2-value space.
        // The group check proves unsatisfiability during the initial
        // propagation, before any decision is made.
        let mut model = CspModel::new("test");
        let mut pairs = Vec::new();
        for i in 0..3 {
            let x = model.add_var(IntVar::new(format!("x{i}"), 0, 1));
            let y = model.add_var(IntVar::fixed(format!("y{i}"), 0));
            pairs.push((x, y));
        }
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                model.add_tuple_not_equal(pairs[i], pairs[j]);
            }
        }

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Unsatisfiable);
        assert_eq!(solution.decisions, 0);
    }

    #[test]
    fn test_unconstrained_pairs_escape_group_check() {
        // Same shape, but only a chain of constraints (x0-x1, x1-x2):
        // x0 and x2 may coincide, so the instance is satisfiable.
        let mut model = CspModel::new("test");
        let mut pairs = Vec::new();
        for i in 0..3 {
            let x = model.add_var(IntVar::new(format!("x{i}"), 0, 1));
            let y = model.add_var(IntVar::fixed(format!("y{i}"), 0));
            pairs.push((x, y));
        }
        model.add_tuple_not_equal(pairs[0], pairs[1]);
        model.add_tuple_not_equal(pairs[1], pairs[2]);

        let solution = BacktrackingSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_satisfiable());
        assert_ne!(solution.value("x0"), solution.value("x1"));
        assert_ne!(solution.value("x1"), solution.value("x2"));
    }

    #[test]
    fn test_budget_exceeded() {
        // Satisfiable, but needs two decisions; a one-decision budget
        // runs out before the verdict.
        let mut model = CspModel::new("test");
        let mut pairs = Vec::new();
        for i in 0..3 {
            let x = model.add_var(IntVar::new(format!("x{i}"), 0, 2));
            let y = model.add_var(IntVar::fixed(format!("y{i}"), 0));
            pairs.push((x, y));
        }
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                model.add_tuple_not_equal(pairs[i], pairs[j]);
            }
        }

        let solver = BacktrackingSolver::new();
        let bounded = solver.solve(&model, &SolverConfig::bounded(1));
        assert_eq!(bounded.status, SolverStatus::BudgetExceeded);

        let unbounded = solver.solve(&model, &SolverConfig::default());
        assert!(unbounded.is_satisfiable());
        assert!(unbounded.decisions > 1);
    }

    #[test]
    fn test_deterministic_outcome() {
        let build = || {
            let mut model = CspModel::new("test");
            let index = model.add_var(IntVar::new("index", 0, 2));
            let result = model.add_var(IntVar::new("result", 0, 100));
            model.add_element(index, vec![50, 20, 35], result);
            model
        };

        let solver = BacktrackingSolver::new();
        let first = solver.solve(&build(), &SolverConfig::default());
        let second = solver.solve(&build(), &SolverConfig::default());
        assert_eq!(first.status, second.status);
        assert_eq!(first.values, second.values);
        assert_eq!(first.decisions, second.decisions);
    }
}
