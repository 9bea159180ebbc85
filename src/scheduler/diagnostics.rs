//! Conflict diagnostics for unfillable slots.

use crate::constraints::Eligibility;

/// Reason given when a group has no members at all.
pub const NO_GROUP_MEMBERS: &str = "no volunteers found in this group";

/// Rejection counts by cause for one slot.
///
/// A volunteer failing several predicates is counted under each of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionTally {
    /// Volunteers whose hours would exceed `max_hours`.
    pub over_capacity: u32,
    /// Volunteers holding an overlapping shift.
    pub overlap: u32,
    /// Volunteers refused by the shift's group policy.
    pub disallowed: u32,
}

impl RejectionTally {
    /// Counts the failed predicates of one rejected volunteer.
    pub fn record(&mut self, eligibility: &Eligibility) {
        if !eligibility.fits_capacity {
            self.over_capacity += 1;
        }
        if !eligibility.no_overlap {
            self.overlap += 1;
        }
        if !eligibility.allowed {
            self.disallowed += 1;
        }
    }

    /// Whether nothing was rejected.
    pub fn is_empty(&self) -> bool {
        self.over_capacity == 0 && self.overlap == 0 && self.disallowed == 0
    }

    /// Human-readable explanations, one per non-zero cause.
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if self.over_capacity > 0 {
            reasons.push(format!("{} volunteers were at max hours", self.over_capacity));
        }
        if self.overlap > 0 {
            reasons.push(format!("{} volunteers had overlapping shifts", self.overlap));
        }
        if self.disallowed > 0 {
            reasons.push(format!(
                "{} volunteers were disallowed by group rules",
                self.disallowed
            ));
        }
        if reasons.is_empty() {
            reasons.push(NO_GROUP_MEMBERS.to_string());
        }
        reasons
    }
}
