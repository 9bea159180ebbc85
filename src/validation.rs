//! Input validation for rostering problems.
//!
//! Checks structural integrity of volunteers and shifts before a roster is
//! built. Detects:
//! - Empty and duplicate IDs
//! - Shifts that do not end after they start
//! - Negative or NaN hour ceilings
//!
//! Prefill pairs that reference unknown IDs are not errors; the roster
//! skips them.

use crate::models::{Shift, Volunteer};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    EmptyId,
    /// A shift's end is not after its start.
    InvalidTimeRange,
    /// A volunteer's `max_hours` is negative or NaN.
    InvalidMaxHours,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a rostering problem.
///
/// Checks:
/// 1. No empty volunteer or shift IDs
/// 2. No duplicate volunteer IDs
/// 3. No duplicate shift IDs
/// 4. Every shift ends after it starts
/// 5. Every `max_hours` is a non-negative number
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(volunteers: &[Volunteer], shifts: &[Shift]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut volunteer_ids = HashSet::new();
    for v in volunteers {
        if v.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Volunteer with empty ID",
            ));
        } else if !volunteer_ids.insert(v.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate volunteer ID: {}", v.id),
            ));
        }

        if v.max_hours.is_nan() || v.max_hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMaxHours,
                format!("Volunteer '{}' has invalid max_hours {}", v.id, v.max_hours),
            ));
        }
    }

    let mut shift_ids = HashSet::new();
    for s in shifts {
        if s.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Shift with empty ID",
            ));
        } else if !shift_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", s.id),
            ));
        }

        if s.end <= s.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!("Shift '{}' does not end after it starts", s.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
