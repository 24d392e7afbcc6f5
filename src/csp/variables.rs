//! CSP variable types.

use serde::{Deserialize, Serialize};

/// A finite domain of integer values, kept sorted ascending.
///
/// Propagation shrinks domains by removing values; a domain reduced to a
/// single value fixes its variable, and an empty domain signals a dead
/// branch of the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    values: Vec<i64>,
}

impl Domain {
    /// Creates a domain holding every value in `[min, max]`.
    ///
    /// `min > max` yields an empty domain.
    pub fn range(min: i64, max: i64) -> Self {
        Self {
            values: (min..=max).collect(),
        }
    }

    /// Creates a domain fixed to a single value.
    pub fn singleton(value: i64) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Creates an empty domain.
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates a domain from arbitrary values (sorted, deduplicated).
    pub fn from_values(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        values.dedup();
        Self { values }
    }

    /// Whether the domain has no values left.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values in the domain.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the domain is reduced to exactly one value.
    pub fn is_fixed(&self) -> bool {
        self.values.len() == 1
    }

    /// The single remaining value, if the domain is fixed.
    pub fn value(&self) -> Option<i64> {
        match self.values.as_slice() {
            [v] => Some(*v),
            _ => None,
        }
    }

    /// Smallest value in the domain.
    pub fn min(&self) -> Option<i64> {
        self.values.first().copied()
    }

    /// Largest value in the domain.
    pub fn max(&self) -> Option<i64> {
        self.values.last().copied()
    }

    /// Whether the domain contains `value`.
    pub fn contains(&self, value: i64) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Removes `value` from the domain. Returns `true` if it was present.
    pub fn remove(&mut self, value: i64) -> bool {
        match self.values.binary_search(&value) {
            Ok(pos) => {
                self.values.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Keeps only values satisfying `pred`. Returns `true` if any value
    /// was removed.
    pub fn retain(&mut self, pred: impl FnMut(i64) -> bool) -> bool {
        let before = self.values.len();
        let mut pred = pred;
        self.values.retain(|&v| pred(v));
        self.values.len() != before
    }

    /// Iterates the remaining values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    /// The remaining values as a slice, ascending.
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// An integer decision variable with a finite domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntVar {
    /// Variable name (unique identifier within a model).
    pub name: String,
    /// Current domain.
    pub domain: Domain,
}

impl IntVar {
    /// Creates a variable with domain `[min, max]`.
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            domain: Domain::range(min, max),
        }
    }

    /// Creates a variable fixed to a single value.
    pub fn fixed(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            domain: Domain::singleton(value),
        }
    }

    /// Creates a variable with an explicit domain.
    pub fn with_domain(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }

    /// Whether this variable is fixed to a single value.
    pub fn is_fixed(&self) -> bool {
        self.domain.is_fixed()
    }

    /// Domain size.
    pub fn domain_size(&self) -> usize {
        self.domain.len()
    }
}
