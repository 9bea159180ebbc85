//! Prefill assignments and conflict diagnostics.

use serde::{Deserialize, Serialize};

/// An externally committed (shift, volunteer) pairing.
///
/// Used only to seed state before assignment. Not validated against
/// constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Shift ID.
    pub shift_id: String,
    /// Volunteer ID.
    pub volunteer_id: String,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(shift_id: impl Into<String>, volunteer_id: impl Into<String>) -> Self {
        Self {
            shift_id: shift_id.into(),
            volunteer_id: volunteer_id.into(),
        }
    }
}

/// Why a (shift, group) slot could not be filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReason {
    /// Shift with the unfilled slot.
    pub shift_id: String,
    /// Group the slot required.
    pub group: String,
    /// Human-readable shortfall explanations.
    pub reasons: Vec<String>,
}

impl ConflictReason {
    /// Creates a conflict record.
    pub fn new(
        shift_id: impl Into<String>,
        group: impl Into<String>,
        reasons: Vec<String>,
    ) -> Self {
        Self {
            shift_id: shift_id.into(),
            group: group.into(),
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_wire_shape() {
        let a: Assignment =
            serde_json::from_str(r#"{"shift_id":"s1","volunteer_id":"v1"}"#).unwrap();
        assert_eq!(a, Assignment::new("s1", "v1"));
    }

    #[test]
    fn test_conflict_wire_shape() {
        let c = ConflictReason::new("s1", "A", vec!["1 volunteers were at max hours".into()]);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["shift_id"], "s1");
        assert_eq!(json["group"], "A");
        assert_eq!(json["reasons"][0], "1 volunteers were at max hours");
    }
}
