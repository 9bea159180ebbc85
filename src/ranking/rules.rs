//! Built-in ranking rules.
//!
//! # Categories
//!
//! - **Load**: LEAST_HOURS, FEWEST_SHIFTS
//! - **Capacity**: LOWEST_UTILIZATION, MOST_REMAINING_CAPACITY, MOST_MAX_HOURS
//!
//! # Score Convention
//! All rules return lower scores for preferred candidates.

use super::{CandidateContext, CandidateRule, RuleScore};
use crate::models::Volunteer;

// ======================== Load rules ========================

/// Least accumulated hours.
///
/// Spreads work toward whoever has done the least so far.
#[derive(Debug, Clone, Copy)]
pub struct LeastHours;

impl CandidateRule for LeastHours {
    fn name(&self) -> &'static str {
        "LEAST_HOURS"
    }

    fn evaluate(&self, volunteer: &Volunteer, _context: &CandidateContext) -> RuleScore {
        volunteer.assigned_hours
    }

    fn description(&self) -> &'static str {
        "Least Accumulated Hours"
    }
}

/// Fewest shifts held.
#[derive(Debug, Clone, Copy)]
pub struct FewestShifts;

impl CandidateRule for FewestShifts {
    fn name(&self) -> &'static str {
        "FEWEST_SHIFTS"
    }

    fn evaluate(&self, volunteer: &Volunteer, _context: &CandidateContext) -> RuleScore {
        volunteer.assigned_shifts.len() as f64
    }

    fn description(&self) -> &'static str {
        "Fewest Shifts Held"
    }
}

// ======================== Capacity rules ========================

/// Lowest share of `max_hours` used.
///
/// Unbounded or non-positive ceilings count as 0% used.
#[derive(Debug, Clone, Copy)]
pub struct LowestUtilization;

impl CandidateRule for LowestUtilization {
    fn name(&self) -> &'static str {
        "LOWEST_UTILIZATION"
    }

    fn evaluate(&self, volunteer: &Volunteer, _context: &CandidateContext) -> RuleScore {
        volunteer.utilization()
    }

    fn description(&self) -> &'static str {
        "Lowest Utilization"
    }
}

/// Most hours left after taking the shift.
#[derive(Debug, Clone, Copy)]
pub struct MostRemainingCapacity;

impl CandidateRule for MostRemainingCapacity {
    fn name(&self) -> &'static str {
        "MOST_REMAINING_CAPACITY"
    }

    fn evaluate(&self, volunteer: &Volunteer, context: &CandidateContext) -> RuleScore {
        let left = volunteer.remaining_hours() - context.shift_hours;
        if left.is_finite() {
            -left
        } else {
            f64::MIN
        }
    }

    fn description(&self) -> &'static str {
        "Most Remaining Capacity"
    }
}

/// Largest hour ceiling.
#[derive(Debug, Clone, Copy)]
pub struct MostMaxHours;

impl CandidateRule for MostMaxHours {
    fn name(&self) -> &'static str {
        "MOST_MAX_HOURS"
    }

    fn evaluate(&self, volunteer: &Volunteer, _context: &CandidateContext) -> RuleScore {
        if volunteer.max_hours.is_finite() {
            -volunteer.max_hours
        } else {
            f64::MIN
        }
    }

    fn description(&self) -> &'static str {
        "Most Max Hours"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_volunteer(id: &str, max_hours: f64, hours: &[f64]) -> Volunteer {
        let mut v = Volunteer::new(id).with_group("A").with_max_hours(max_hours);
        for (i, &h) in hours.iter().enumerate() {
            v.take_shift(&format!("{id}_s{i}"), h);
        }
        v
    }

    #[test]
    fn test_least_hours() {
        let ctx = CandidateContext { shift_hours: 2.0 };
        let light = make_volunteer("light", 10.0, &[1.0]);
        let heavy = make_volunteer("heavy", 10.0, &[4.0]);
        assert!(LeastHours.evaluate(&light, &ctx) < LeastHours.evaluate(&heavy, &ctx));
    }

    #[test]
    fn test_fewest_shifts() {
        let ctx = CandidateContext::default();
        let one = make_volunteer("one", 10.0, &[4.0]);
        let two = make_volunteer("two", 10.0, &[1.0, 1.0]);
        assert!(FewestShifts.evaluate(&one, &ctx) < FewestShifts.evaluate(&two, &ctx));
    }

    #[test]
    fn test_lowest_utilization() {
        let ctx = CandidateContext::default();
        // 4/20 = 0.2 vs 3/6 = 0.5
        let roomy = make_volunteer("roomy", 20.0, &[4.0]);
        let tight = make_volunteer("tight", 6.0, &[3.0]);
        assert!(LowestUtilization.evaluate(&roomy, &ctx) < LowestUtilization.evaluate(&tight, &ctx));
    }

    #[test]
    fn test_most_remaining_capacity() {
        let ctx = CandidateContext { shift_hours: 2.0 };
        let roomy = make_volunteer("roomy", 20.0, &[4.0]);
        let tight = make_volunteer("tight", 6.0, &[1.0]);
        let unbounded = Volunteer::new("free").with_group("A");
        assert!(
            MostRemainingCapacity.evaluate(&roomy, &ctx)
                < MostRemainingCapacity.evaluate(&tight, &ctx)
        );
        assert!(
            MostRemainingCapacity.evaluate(&unbounded, &ctx)
                < MostRemainingCapacity.evaluate(&roomy, &ctx)
        );
    }

    #[test]
    fn test_most_max_hours() {
        let ctx = CandidateContext::default();
        let big = make_volunteer("big", 40.0, &[]);
        let small = make_volunteer("small", 8.0, &[]);
        assert!(MostMaxHours.evaluate(&big, &ctx) < MostMaxHours.evaluate(&small, &ctx));
    }
}
