//! Shift model.
//!
//! A shift is a half-open time interval `[start, end)` with a per-group
//! headcount requirement and an optional group allow/deny policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A time-boxed shift that needs volunteers.
///
/// `required_groups` is a `BTreeMap` so that slot generation walks groups
/// in a stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: String,
    /// Start instant (inclusive).
    pub start: DateTime<Utc>,
    /// End instant (exclusive).
    pub end: DateTime<Utc>,
    /// Required headcount per group label.
    #[serde(default)]
    pub required_groups: BTreeMap<String, u32>,
    /// If present and non-empty, only these groups may work the shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_groups: Option<Vec<String>>,
    /// Groups that may never work the shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_groups: Option<Vec<String>>,
    /// Assigned volunteer IDs, in assignment order.
    #[serde(default)]
    pub assigned: Vec<String>,
}

impl Shift {
    /// Creates a shift with no requirements.
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            required_groups: BTreeMap::new(),
            allowed_groups: None,
            excluded_groups: None,
            assigned: Vec::new(),
        }
    }

    /// Adds a headcount requirement for a group.
    pub fn with_requirement(mut self, group: impl Into<String>, count: u32) -> Self {
        self.required_groups.insert(group.into(), count);
        self
    }

    /// Sets the allow-list.
    pub fn with_allowed_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the deny-list.
    pub fn with_excluded_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Duration in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Total headcount across all groups.
    pub fn total_required(&self) -> u32 {
        self.required_groups.values().sum()
    }

    /// Whether `group` appears in the deny-list.
    pub fn excludes(&self, group: Option<&str>) -> bool {
        match (group, &self.excluded_groups) {
            (Some(g), Some(list)) => list.iter().any(|x| x == g),
            _ => false,
        }
    }

    /// Whether an allow-list is present and non-empty.
    pub fn has_allow_list(&self) -> bool {
        self.allowed_groups.as_ref().is_some_and(|l| !l.is_empty())
    }

    /// Whether `group` appears in the allow-list.
    pub fn lists_allowed(&self, group: Option<&str>) -> bool {
        match (group, &self.allowed_groups) {
            (Some(g), Some(list)) => list.iter().any(|x| x == g),
            _ => false,
        }
    }
}
