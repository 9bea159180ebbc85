//! Volunteer model.
//!
//! A volunteer belongs to at most one group, has an hour ceiling, and
//! carries run-time accumulators (hours and shift IDs) that only the
//! prefill step and the greedy pass mutate.

use serde::{Deserialize, Serialize};

/// A person available for shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    /// Unique volunteer identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Group label. `None` = ungrouped (never matches a required group).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Maximum assignable hours.
    pub max_hours: f64,
    /// Hours accumulated during the current run.
    #[serde(default)]
    pub assigned_hours: f64,
    /// Shift IDs held, in assignment order.
    #[serde(default)]
    pub assigned_shifts: Vec<String>,
}

impl Volunteer {
    /// Creates an ungrouped volunteer with no hour ceiling.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            group: None,
            max_hours: f64::INFINITY,
            assigned_hours: 0.0,
            assigned_shifts: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the group label.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the hour ceiling.
    pub fn with_max_hours(mut self, max_hours: f64) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Whether this volunteer belongs to `group`.
    #[inline]
    pub fn in_group(&self, group: &str) -> bool {
        self.group.as_deref() == Some(group)
    }

    /// Hours still available before reaching `max_hours`.
    pub fn remaining_hours(&self) -> f64 {
        self.max_hours - self.assigned_hours
    }

    /// Fraction of `max_hours` already used.
    ///
    /// Returns 0.0 for unbounded or non-positive ceilings.
    pub fn utilization(&self) -> f64 {
        if !self.max_hours.is_finite() || self.max_hours <= 0.0 {
            return 0.0;
        }
        self.assigned_hours / self.max_hours
    }

    /// Records a shift of `hours` length.
    pub(crate) fn take_shift(&mut self, shift_id: &str, hours: f64) {
        self.assigned_hours += hours;
        self.assigned_shifts.push(shift_id.to_string());
    }

    /// Clears the run-time accumulators.
    pub(crate) fn clear_assignments(&mut self) {
        self.assigned_hours = 0.0;
        self.assigned_shifts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volunteer_builder() {
        let v = Volunteer::new("v1")
            .with_name("Alice")
            .with_group("Adults")
            .with_max_hours(10.0);

        assert_eq!(v.id, "v1");
        assert_eq!(v.name, "Alice");
        assert!(v.in_group("Adults"));
        assert!(!v.in_group("Delegates"));
        assert!((v.max_hours - 10.0).abs() < 1e-10);
        assert!((v.assigned_hours - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_ungrouped_matches_nothing() {
        let v = Volunteer::new("v1");
        assert!(!v.in_group(""));
        assert!(!v.in_group("A"));
    }

    #[test]
    fn test_take_shift_accumulates() {
        let mut v = Volunteer::new("v1").with_max_hours(8.0);
        v.take_shift("s1", 2.0);
        v.take_shift("s2", 3.5);
        assert!((v.assigned_hours - 5.5).abs() < 1e-10);
        assert_eq!(v.assigned_shifts, vec!["s1", "s2"]);
        assert!((v.remaining_hours() - 2.5).abs() < 1e-10);

        v.clear_assignments();
        assert!(v.assigned_shifts.is_empty());
        assert!((v.assigned_hours - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_utilization() {
        let mut v = Volunteer::new("v1").with_max_hours(10.0);
        v.take_shift("s1", 4.0);
        assert!((v.utilization() - 0.4).abs() < 1e-10);

        let unbounded = Volunteer::new("v2");
        assert!((unbounded.utilization() - 0.0).abs() < 1e-10);

        let zero = Volunteer::new("v3").with_max_hours(0.0);
        assert!((zero.utilization() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_deserialize_defaults_accumulators() {
        let v: Volunteer =
            serde_json::from_str(r#"{"id":"v1","name":"Bob","group":"A","max_hours":6}"#).unwrap();
        assert_eq!(v.group.as_deref(), Some("A"));
        assert!((v.assigned_hours - 0.0).abs() < 1e-10);
        assert!(v.assigned_shifts.is_empty());

        let ungrouped: Volunteer = serde_json::from_str(r#"{"id":"v2","max_hours":6}"#).unwrap();
        assert!(ungrouped.group.is_none());
        assert!(ungrouped.name.is_empty());
    }
}
