//! Greedy least-loaded assignment pass.
//!
//! # Algorithm
//!
//! 1. Partition volunteers by group once per pass.
//! 2. For each slot in sequence order, check every group member against
//!    the constraint predicates, tallying rejections by cause.
//! 3. Hand the eligible members to the ranking engine and assign the
//!    preferred one.
//! 4. If nobody is eligible, record a [`ConflictReason`] from the tally.
//!
//! The pass never backtracks: an earlier assignment is never undone to
//! make room for a later slot.
//!
//! # Complexity
//! O(s * g * h) where s=slots, g=group size, h=shifts held per volunteer.

use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

use super::diagnostics::RejectionTally;
use super::slots::{generate_slots, shuffle_slots, Slot};
use crate::constraints::Eligibility;
use crate::models::{ConflictReason, Roster, Volunteer};
use crate::ranking::{CandidateContext, RankingEngine};

/// One greedy pass over a slot sequence.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPass<'a> {
    ranking: &'a RankingEngine,
}

impl<'a> GreedyPass<'a> {
    /// Creates a pass that picks candidates with `ranking`.
    pub fn new(ranking: &'a RankingEngine) -> Self {
        Self { ranking }
    }

    /// Fills slots in order, mutating the roster.
    ///
    /// Returns one conflict per slot that could not be filled. Slots naming
    /// an unknown shift are skipped.
    pub fn run(&self, roster: &mut Roster, slots: &[Slot]) -> Vec<ConflictReason> {
        let members = partition_by_group(roster.volunteers());
        let mut conflicts = Vec::new();
        let mut filled = 0usize;

        for slot in slots {
            let Some(s) = roster.shift_position(&slot.shift_id) else {
                continue;
            };
            let group_members = members.get(slot.group.as_str()).map_or(&[][..], Vec::as_slice);

            match self.pick(roster, s, group_members) {
                Ok(v) => {
                    roster.assign(s, v);
                    filled += 1;
                }
                Err(tally) => conflicts.push(ConflictReason::new(
                    &slot.shift_id,
                    &slot.group,
                    tally.reasons(),
                )),
            }
        }

        debug!(
            event = "pass_end",
            slots = slots.len(),
            filled,
            conflicts = conflicts.len(),
        );
        conflicts
    }

    /// Chooses a volunteer position for the shift at `s`, or explains why
    /// none qualifies.
    fn pick(
        &self,
        roster: &Roster,
        s: usize,
        group_members: &[usize],
    ) -> Result<usize, RejectionTally> {
        let shift = &roster.shifts()[s];
        let volunteers = roster.volunteers();
        let mut tally = RejectionTally::default();
        let mut eligible: Vec<usize> = Vec::with_capacity(group_members.len());

        for &v in group_members {
            let e = Eligibility::check(roster, &volunteers[v], shift);
            if e.is_eligible() {
                eligible.push(v);
            } else {
                tally.record(&e);
            }
        }

        let candidates: Vec<&Volunteer> = eligible.iter().map(|&v| &volunteers[v]).collect();
        self.ranking
            .select_best(&candidates, &CandidateContext::for_shift(shift))
            .map(|i| eligible[i])
            .ok_or(tally)
    }
}

/// Volunteer positions per group label, each list in input order.
/// Ungrouped volunteers are left out.
fn partition_by_group(volunteers: &[Volunteer]) -> HashMap<String, Vec<usize>> {
    let mut members: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, v) in volunteers.iter().enumerate() {
        if let Some(group) = &v.group {
            members.entry(group.clone()).or_default().push(i);
        }
    }
    members
}

/// Generates slots, optionally shuffles them, and runs one greedy pass.
pub fn assign_single_pass<R: Rng + ?Sized>(
    roster: &mut Roster,
    ranking: &RankingEngine,
    shuffle: bool,
    rng: &mut R,
) -> Vec<ConflictReason> {
    let mut slots = generate_slots(roster);
    if shuffle {
        shuffle_slots(&mut slots, rng);
    }
    GreedyPass::new(ranking).run(roster, &slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Shift};
    use crate::ranking::Strategy;
    use crate::scheduler::diagnostics::NO_GROUP_MEMBERS;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    fn run_unshuffled(roster: &mut Roster) -> Vec<ConflictReason> {
        let ranking = Strategy::MinimizeUnfilled.engine();
        let mut rng = SmallRng::seed_from_u64(42);
        assign_single_pass(roster, &ranking, false, &mut rng)
    }

    #[test]
    fn test_single_slot_least_loaded() {
        let mut roster = Roster::new(
            vec![
                Volunteer::new("v1").with_group("A").with_max_hours(10.0),
                Volunteer::new("v2").with_group("A").with_max_hours(10.0),
            ],
            vec![Shift::new("s1", at(9), at(11)).with_requirement("A", 1)],
        );
        let conflicts = run_unshuffled(&mut roster);

        assert!(conflicts.is_empty());
        let assigned = &roster.shift("s1").unwrap().assigned;
        assert_eq!(assigned.len(), 1);
        let taken = roster.volunteer(&assigned[0]).unwrap();
        assert!((taken.assigned_hours - 2.0).abs() < 1e-10);
        let other_id = if assigned[0] == "v1" { "v2" } else { "v1" };
        assert!((roster.volunteer(other_id).unwrap().assigned_hours - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_balances_across_shifts() {
        let mut roster = Roster::new(
            vec![
                Volunteer::new("v1").with_group("A").with_max_hours(10.0),
                Volunteer::new("v2").with_group("A").with_max_hours(10.0),
            ],
            vec![
                Shift::new("s1", at(9), at(11)).with_requirement("A", 1),
                Shift::new("s2", at(12), at(14)).with_requirement("A", 1),
            ],
        );
        run_unshuffled(&mut roster);

        assert_eq!(roster.shift("s1").unwrap().assigned, vec!["v1"]);
        assert_eq!(roster.shift("s2").unwrap().assigned, vec!["v2"]);
    }

    #[test]
    fn test_over_capacity_conflict() {
        let mut roster = Roster::new(
            vec![Volunteer::new("v1").with_group("A").with_max_hours(2.0)],
            vec![Shift::new("s1", at(9), at(12)).with_requirement("A", 1)],
        );
        let conflicts = run_unshuffled(&mut roster);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].shift_id, "s1");
        assert_eq!(conflicts[0].group, "A");
        assert_eq!(conflicts[0].reasons, vec!["1 volunteers were at max hours"]);
        assert_eq!(roster.unfilled_shift_ids(), vec!["s1"]);
    }

    #[test]
    fn test_overlap_conflict() {
        let mut roster = Roster::new(
            vec![Volunteer::new("v1").with_group("A").with_max_hours(10.0)],
            vec![
                Shift::new("s1", at(9), at(12)).with_requirement("A", 1),
                Shift::new("s2", at(10), at(13)).with_requirement("A", 1),
            ],
        );
        let conflicts = run_unshuffled(&mut roster);

        assert_eq!(roster.shift("s1").unwrap().assigned, vec!["v1"]);
        assert!(roster.shift("s2").unwrap().assigned.is_empty());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].shift_id, "s2");
        assert_eq!(conflicts[0].reasons, vec!["1 volunteers had overlapping shifts"]);
    }

    #[test]
    fn test_back_to_back_allowed() {
        let mut roster = Roster::new(
            vec![Volunteer::new("v1").with_group("A").with_max_hours(10.0)],
            vec![
                Shift::new("s1", at(9), at(11)).with_requirement("A", 1),
                Shift::new("s2", at(11), at(13)).with_requirement("A", 1),
            ],
        );
        let conflicts = run_unshuffled(&mut roster);
        assert!(conflicts.is_empty());
        assert_eq!(roster.volunteer("v1").unwrap().assigned_shifts, vec!["s1", "s2"]);
    }

    #[test]
    fn test_empty_group_conflict() {
        let mut roster = Roster::new(
            vec![Volunteer::new("v1").with_group("A")],
            vec![Shift::new("s1", at(9), at(10)).with_requirement("B", 1)],
        );
        let conflicts = run_unshuffled(&mut roster);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].reasons, vec![NO_GROUP_MEMBERS]);
    }

    #[test]
    fn test_policy_conflict() {
        let mut roster = Roster::new(
            vec![
                Volunteer::new("v1").with_group("Minors"),
                Volunteer::new("v2").with_group("Minors"),
            ],
            vec![Shift::new("s1", at(22), at(23))
                .with_requirement("Minors", 1)
                .with_excluded_groups(["Minors"])],
        );
        let conflicts = run_unshuffled(&mut roster);
        assert!(roster.shift("s1").unwrap().assigned.is_empty());
        assert_eq!(conflicts[0].reasons, vec!["2 volunteers were disallowed by group rules"]);
    }

    #[test]
    fn test_prefilled_volunteer_not_double_booked() {
        let mut roster = Roster::new(
            vec![
                Volunteer::new("v1").with_group("A"),
                Volunteer::new("v2").with_group("A"),
            ],
            vec![Shift::new("s1", at(9), at(10)).with_requirement("A", 2)],
        );
        roster.prefill(&[Assignment::new("s1", "v1")]);
        let conflicts = run_unshuffled(&mut roster);

        assert!(conflicts.is_empty());
        assert_eq!(roster.shift("s1").unwrap().assigned, vec!["v1", "v2"]);
    }

    #[test]
    fn test_ungrouped_never_assigned() {
        let mut roster = Roster::new(
            vec![Volunteer::new("v1")],
            vec![Shift::new("s1", at(9), at(10)).with_requirement("A", 1)],
        );
        let conflicts = run_unshuffled(&mut roster);
        assert_eq!(conflicts[0].reasons, vec![NO_GROUP_MEMBERS]);
    }

    #[test]
    fn test_unknown_slot_shift_skipped() {
        let mut roster = Roster::new(vec![Volunteer::new("v1").with_group("A")], vec![]);
        let ranking = Strategy::MinimizeUnfilled.engine();
        let conflicts = GreedyPass::new(&ranking).run(&mut roster, &[Slot::new("ghost", "A")]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_minimize_overtime_prefers_low_utilization() {
        // v1 holds 4h of 8h (50%), v2 holds 6h of 30h (20%)
        let mut roster = Roster::new(
            vec![
                Volunteer::new("v1").with_group("A").with_max_hours(8.0),
                Volunteer::new("v2").with_group("A").with_max_hours(30.0),
            ],
            vec![
                Shift::new("p1", at(0), at(4)),
                Shift::new("p2", at(0), at(6)),
                Shift::new("s1", at(9), at(10)).with_requirement("A", 1),
            ],
        );
        roster.prefill(&[Assignment::new("p1", "v1"), Assignment::new("p2", "v2")]);

        let mut fair = roster.clone();
        let mut rng = SmallRng::seed_from_u64(1);
        assign_single_pass(&mut fair, &Strategy::MinimizeUnfilled.engine(), false, &mut rng);
        assert_eq!(fair.shift("s1").unwrap().assigned, vec!["v1"]);

        assign_single_pass(&mut roster, &Strategy::MinimizeOvertime.engine(), false, &mut rng);
        assert_eq!(roster.shift("s1").unwrap().assigned, vec!["v2"]);
    }
}
