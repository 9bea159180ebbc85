//! Constraint evaluation.
//!
//! Pure predicates over a volunteer and a candidate shift:
//! - group allow/deny policy
//! - half-open interval overlap against shifts already held
//! - hour ceiling
//!
//! A volunteer is *eligible* for a `(shift, group)` slot when it belongs to
//! the group and all three predicates hold.

use chrono::{DateTime, Utc};

use crate::models::{Roster, Shift, Volunteer};

/// Whether the shift's group policy admits the volunteer.
///
/// The deny-list is checked first. A present, non-empty allow-list then
/// admits only its members; ungrouped volunteers never pass it.
pub fn allows(shift: &Shift, volunteer: &Volunteer) -> bool {
    let group = volunteer.group.as_deref();
    if shift.excludes(group) {
        return false;
    }
    if shift.has_allow_list() && !shift.lists_allowed(group) {
        return false;
    }
    true
}

/// Half-open interval intersection. Back-to-back intervals do not overlap.
#[inline]
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether any shift the volunteer already holds overlaps `shift`.
///
/// Held shift IDs unknown to the roster are ignored.
pub fn would_overlap(roster: &Roster, volunteer: &Volunteer, shift: &Shift) -> bool {
    volunteer
        .assigned_shifts
        .iter()
        .filter_map(|id| roster.shift(id))
        .any(|held| overlaps(held.start, held.end, shift.start, shift.end))
}

/// Whether taking `shift` keeps the volunteer within `max_hours`.
#[inline]
pub fn fits_capacity(volunteer: &Volunteer, shift: &Shift) -> bool {
    volunteer.assigned_hours + shift.duration_hours() <= volunteer.max_hours
}

/// Outcome of every predicate for one volunteer against one shift.
///
/// All three are evaluated even when one fails, so rejection counts can
/// attribute a volunteer to several causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    /// Hour ceiling respected.
    pub fits_capacity: bool,
    /// No overlap with held shifts.
    pub no_overlap: bool,
    /// Group policy admits the volunteer.
    pub allowed: bool,
}

impl Eligibility {
    /// Evaluates all predicates.
    pub fn check(roster: &Roster, volunteer: &Volunteer, shift: &Shift) -> Self {
        Self {
            fits_capacity: fits_capacity(volunteer, shift),
            no_overlap: !would_overlap(roster, volunteer, shift),
            allowed: allows(shift, volunteer),
        }
    }

    /// Whether every predicate holds.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.fits_capacity && self.no_overlap && self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_allows_no_policy() {
        let s = Shift::new("s1", at(9), at(10));
        assert!(allows(&s, &Volunteer::new("v1").with_group("A")));
        assert!(allows(&s, &Volunteer::new("v2")));
    }

    #[test]
    fn test_allows_deny_list() {
        let s = Shift::new("s1", at(9), at(10)).with_excluded_groups(["Minors"]);
        assert!(!allows(&s, &Volunteer::new("v1").with_group("Minors")));
        assert!(allows(&s, &Volunteer::new("v2").with_group("Adults")));
        assert!(allows(&s, &Volunteer::new("v3")));
    }

    #[test]
    fn test_allows_allow_list() {
        let s = Shift::new("s1", at(9), at(10)).with_allowed_groups(["Adults"]);
        assert!(allows(&s, &Volunteer::new("v1").with_group("Adults")));
        assert!(!allows(&s, &Volunteer::new("v2").with_group("Minors")));
        assert!(!allows(&s, &Volunteer::new("v3")));
    }

    #[test]
    fn test_deny_beats_allow() {
        let s = Shift::new("s1", at(9), at(10))
            .with_allowed_groups(["A"])
            .with_excluded_groups(["A"]);
        assert!(!allows(&s, &Volunteer::new("v1").with_group("A")));
    }

    #[test]
    fn test_overlaps() {
        assert!(overlaps(at(9), at(12), at(10), at(13)));
        assert!(overlaps(at(10), at(11), at(9), at(12)));
        assert!(!overlaps(at(9), at(10), at(10), at(11)));
        assert!(!overlaps(at(10), at(11), at(9), at(10)));
        assert!(!overlaps(at(9), at(10), at(14), at(15)));
    }

    #[test]
    fn test_would_overlap() {
        let mut roster = Roster::new(
            vec![Volunteer::new("v1").with_group("A")],
            vec![
                Shift::new("s1", at(9), at(12)),
                Shift::new("s2", at(10), at(13)),
                Shift::new("s3", at(12), at(14)),
            ],
        );
        roster.prefill(&[Assignment::new("s1", "v1")]);
        let v = roster.volunteer("v1").unwrap();

        assert!(would_overlap(&roster, v, roster.shift("s2").unwrap()));
        assert!(!would_overlap(&roster, v, roster.shift("s3").unwrap()));
        // Holding a shift overlaps that same shift.
        assert!(would_overlap(&roster, v, roster.shift("s1").unwrap()));
    }

    #[test]
    fn test_fits_capacity_boundary() {
        let s = Shift::new("s1", at(9), at(11));
        assert!(fits_capacity(&Volunteer::new("v1").with_max_hours(2.0), &s));
        assert!(!fits_capacity(&Volunteer::new("v2").with_max_hours(1.5), &s));
        assert!(fits_capacity(&Volunteer::new("v3"), &s));
    }

    #[test]
    fn test_eligibility_reports_every_cause() {
        let roster = Roster::new(vec![], vec![]);
        let s = Shift::new("s1", at(9), at(12)).with_excluded_groups(["A"]);
        let v = Volunteer::new("v1").with_group("A").with_max_hours(1.0);

        let e = Eligibility::check(&roster, &v, &s);
        assert!(!e.fits_capacity);
        assert!(e.no_overlap);
        assert!(!e.allowed);
        assert!(!e.is_eligible());
    }
}
