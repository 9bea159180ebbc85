//! Roster (working state) model.
//!
//! A roster owns the volunteers and shifts of one scheduling run, in the
//! caller's input order, with ID lookups on the side. Vectors rather than
//! hash maps keep every traversal deterministic.

use std::collections::HashMap;

use tracing::debug;

use super::{Assignment, Shift, Volunteer};

/// Volunteers and shifts of a single run.
///
/// Built fresh per request and never shared between runs.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    volunteers: Vec<Volunteer>,
    shifts: Vec<Shift>,
    volunteer_index: HashMap<String, usize>,
    shift_index: HashMap<String, usize>,
}

impl Roster {
    /// Creates a roster. On duplicate IDs the first occurrence wins
    /// lookups; reject duplicates with
    /// [`validate_input`](crate::validation::validate_input) beforehand.
    pub fn new(volunteers: Vec<Volunteer>, shifts: Vec<Shift>) -> Self {
        let mut volunteer_index = HashMap::with_capacity(volunteers.len());
        for (i, v) in volunteers.iter().enumerate() {
            volunteer_index.entry(v.id.clone()).or_insert(i);
        }
        let mut shift_index = HashMap::with_capacity(shifts.len());
        for (i, s) in shifts.iter().enumerate() {
            shift_index.entry(s.id.clone()).or_insert(i);
        }
        Self {
            volunteers,
            shifts,
            volunteer_index,
            shift_index,
        }
    }

    /// Volunteers in input order.
    pub fn volunteers(&self) -> &[Volunteer] {
        &self.volunteers
    }

    /// Shifts in input order.
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub(crate) fn volunteers_mut(&mut self) -> &mut [Volunteer] {
        &mut self.volunteers
    }

    pub(crate) fn shifts_mut(&mut self) -> &mut [Shift] {
        &mut self.shifts
    }

    /// Looks up a volunteer by ID.
    pub fn volunteer(&self, id: &str) -> Option<&Volunteer> {
        self.volunteer_index.get(id).map(|&i| &self.volunteers[i])
    }

    /// Looks up a shift by ID.
    pub fn shift(&self, id: &str) -> Option<&Shift> {
        self.shift_index.get(id).map(|&i| &self.shifts[i])
    }

    /// Position of a volunteer in input order.
    pub fn volunteer_position(&self, id: &str) -> Option<usize> {
        self.volunteer_index.get(id).copied()
    }

    /// Position of a shift in input order.
    pub fn shift_position(&self, id: &str) -> Option<usize> {
        self.shift_index.get(id).copied()
    }

    /// Applies externally committed assignments.
    ///
    /// Pairs whose shift or volunteer is unknown are skipped. No
    /// constraint is re-checked. Returns the number of pairs applied.
    pub fn prefill(&mut self, assignments: &[Assignment]) -> usize {
        let mut applied = 0;
        for a in assignments {
            match (
                self.shift_position(&a.shift_id),
                self.volunteer_position(&a.volunteer_id),
            ) {
                (Some(s), Some(v)) => {
                    self.assign(s, v);
                    applied += 1;
                }
                _ => {
                    debug!(
                        event = "prefill_skipped",
                        shift_id = %a.shift_id,
                        volunteer_id = %a.volunteer_id,
                    );
                }
            }
        }
        debug!(
            event = "prefill_applied",
            applied,
            skipped = assignments.len() - applied,
        );
        applied
    }

    /// Records volunteer `v` on shift `s` (both positions) and books the hours.
    pub(crate) fn assign(&mut self, s: usize, v: usize) {
        let shift = &mut self.shifts[s];
        let hours = shift.duration_hours();
        let volunteer = &mut self.volunteers[v];
        shift.assigned.push(volunteer.id.clone());
        volunteer.take_shift(&shift.id, hours);
    }

    /// Number of volunteers of `group` currently on the shift at `s`.
    pub fn group_count(&self, s: usize, group: &str) -> u32 {
        self.shifts[s]
            .assigned
            .iter()
            .filter_map(|id| self.volunteer(id))
            .filter(|v| v.in_group(group))
            .count() as u32
    }

    /// Open positions for `group` on the shift at `s`.
    pub fn shortfall(&self, s: usize, group: &str) -> u32 {
        let required = self.shifts[s]
            .required_groups
            .get(group)
            .copied()
            .unwrap_or(0);
        required.saturating_sub(self.group_count(s, group))
    }

    /// Total required headcount across all shifts and groups.
    pub fn required_slots(&self) -> u32 {
        self.shifts.iter().map(Shift::total_required).sum()
    }

    /// Required positions currently filled, capped per (shift, group).
    pub fn filled_slots(&self) -> u32 {
        self.shifts
            .iter()
            .enumerate()
            .flat_map(|(s, shift)| {
                shift
                    .required_groups
                    .iter()
                    .map(move |(group, &count)| self.group_count(s, group).min(count))
            })
            .sum()
    }

    /// Filled / required ratio. 1.0 when nothing is required.
    pub fn fill_rate(&self) -> f64 {
        let required = self.required_slots();
        if required == 0 {
            return 1.0;
        }
        self.filled_slots() as f64 / required as f64
    }

    /// IDs of shifts with at least one open required position, in input order.
    pub fn unfilled_shift_ids(&self) -> Vec<String> {
        self.shifts
            .iter()
            .enumerate()
            .filter(|(s, shift)| {
                shift
                    .required_groups
                    .keys()
                    .any(|group| self.shortfall(*s, group) > 0)
            })
            .map(|(_, shift)| shift.id.clone())
            .collect()
    }

    /// Per-shift assigned lists, in input order.
    pub fn shift_assignments(&self) -> Vec<Vec<String>> {
        self.shifts.iter().map(|s| s.assigned.clone()).collect()
    }

    /// Clears every assignment and zeroes the volunteer accumulators.
    pub fn reset(&mut self) {
        for v in &mut self.volunteers {
            v.clear_assignments();
        }
        for shift in &mut self.shifts {
            shift.assigned.clear();
        }
    }

    /// Replaces every shift's assigned list and rebuilds the volunteer
    /// accumulators from them.
    ///
    /// Volunteer shift lists come out in shift input order. IDs unknown
    /// to the roster stay on the shift but book no hours.
    pub fn replay(&mut self, lists: Vec<Vec<String>>) {
        self.reset();
        let count = self.shifts.len();
        for (s, ids) in lists.into_iter().enumerate().take(count) {
            for id in ids {
                match self.volunteer_position(&id) {
                    Some(v) => self.assign(s, v),
                    None => self.shifts[s].assigned.push(id),
                }
            }
        }
    }

    /// Consumes the roster, returning volunteers and shifts.
    pub fn into_parts(self) -> (Vec<Volunteer>, Vec<Shift>) {
        (self.volunteers, self.shifts)
    }
}
