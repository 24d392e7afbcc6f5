//! Input validation for timetabling problems.
//!
//! Checks structural integrity of classes and rooms before scheduling.
//! Detects:
//! - Duplicate class or room names
//! - Non-positive class or room sizes
//!
//! All problems are collected and reported together rather than failing
//! on the first one.

use crate::models::{Class, Room};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two classes or two rooms share the same name.
    DuplicateName,
    /// A class or room has a size below 1.
    NonPositiveSize,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. No duplicate class names
/// 2. No duplicate room names
/// 3. All class sizes are positive
/// 4. All room sizes are positive
///
/// Empty sequences are legal — scheduling zero classes is trivially
/// satisfiable, and zero rooms simply makes any class set infeasible.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(classes: &[Class], rooms: &[Room]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut class_names = HashSet::new();
    for class in classes {
        if !class_names.insert(class.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate class name: {}", class.name),
            ));
        }
        if class.size < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSize,
                format!("Class '{}' has non-positive size {}", class.name, class.size),
            ));
        }
    }

    let mut room_names = HashSet::new();
    for room in rooms {
        if !room_names.insert(room.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate room name: {}", room.name),
            ));
        }
        if room.size < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSize,
                format!("Room '{}' has non-positive size {}", room.name, room.size),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
