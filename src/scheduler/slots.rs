//! Slot generation.
//!
//! Expands each shift's per-group shortfall into unfilled slots. Shifts
//! are walked in input order and groups in key order, so the unshuffled
//! sequence is fully deterministic.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Roster;

/// One open `(shift, group)` position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Shift to fill.
    pub shift_id: String,
    /// Group the position requires.
    pub group: String,
}

impl Slot {
    /// Creates a slot.
    pub fn new(shift_id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            shift_id: shift_id.into(),
            group: group.into(),
        }
    }
}

/// Lists every open position, one slot per missing volunteer.
///
/// Groups already at or above their required count produce nothing.
pub fn generate_slots(roster: &Roster) -> Vec<Slot> {
    let mut slots = Vec::new();
    for (s, shift) in roster.shifts().iter().enumerate() {
        for group in shift.required_groups.keys() {
            let needed = roster.shortfall(s, group);
            for _ in 0..needed {
                slots.push(Slot::new(&shift.id, group));
            }
        }
    }
    slots
}

/// Uniformly permutes the slots with the caller's generator.
pub fn shuffle_slots<R: Rng + ?Sized>(slots: &mut [Slot], rng: &mut R) {
    if slots.is_empty() {
        return;
    }
    slots.shuffle(rng);
}
