//! Multi-pass randomized search.
//!
//! Reruns the shuffled greedy pass from the post-prefill baseline until
//! every required position is filled, the time budget runs out, or an
//! optional pass cap is hit. The best pass by fill rate wins.
//!
//! Time is read through a [`Clock`] so a budget can be exhausted in tests
//! without sleeping.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use super::greedy::GreedyPass;
use super::slots::{generate_slots, shuffle_slots};
use crate::models::{ConflictReason, Roster};
use crate::ranking::RankingEngine;

/// Source of the current instant.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every required position was filled.
    Perfect,
    /// The deadline passed (or the budget was zero or unrepresentable).
    BudgetExhausted,
    /// The configured pass cap was reached.
    PassLimit,
}

impl StopReason {
    fn as_str(self) -> &'static str {
        match self {
            StopReason::Perfect => "perfect",
            StopReason::BudgetExhausted => "budget_exhausted",
            StopReason::PassLimit => "pass_limit",
        }
    }
}

/// Summary of a search.
#[derive(Debug, Clone)]
pub struct OptimizerReport {
    /// Passes run (at least 1).
    pub passes: u32,
    /// Fill rate of the winning pass.
    pub best_fill_rate: f64,
    /// Why the search ended.
    pub stop_reason: StopReason,
    /// Conflicts recorded by the winning pass.
    pub conflicts: Vec<ConflictReason>,
}

#[derive(Debug, Clone, Copy)]
enum SearchState {
    Searching { deadline: Option<Instant> },
    Done(StopReason),
}

struct BestPass {
    fill_rate: f64,
    assignments: Vec<Vec<String>>,
    conflicts: Vec<ConflictReason>,
}

/// Post-prefill state that every pass starts from.
struct Baseline {
    shifts: Vec<Vec<String>>,
    volunteers: Vec<(f64, Vec<String>)>,
}

impl Baseline {
    fn capture(roster: &Roster) -> Self {
        Self {
            shifts: roster.shift_assignments(),
            volunteers: roster
                .volunteers()
                .iter()
                .map(|v| (v.assigned_hours, v.assigned_shifts.clone()))
                .collect(),
        }
    }

    fn restore(&self, roster: &mut Roster) {
        for (shift, assigned) in roster.shifts_mut().iter_mut().zip(&self.shifts) {
            shift.assigned.clone_from(assigned);
        }
        for (v, (hours, held)) in roster.volunteers_mut().iter_mut().zip(&self.volunteers) {
            v.assigned_hours = *hours;
            v.assigned_shifts.clone_from(held);
        }
    }

    /// Restores the baseline, then books every assignment the winning pass
    /// added on top of it.
    fn apply(&self, roster: &mut Roster, winning: &[Vec<String>]) {
        self.restore(roster);
        for (s, (base, won)) in self.shifts.iter().zip(winning).enumerate() {
            for id in won.iter().skip(base.len()) {
                if let Some(v) = roster.volunteer_position(id) {
                    roster.assign(s, v);
                }
            }
        }
    }
}

/// Time-boxed multi-pass optimizer.
///
/// A zero budget, or one too large to add to the current instant, runs
/// the first pass only.
#[derive(Debug, Clone)]
pub struct MultiPassOptimizer {
    budget: Duration,
    max_passes: Option<u32>,
}

impl MultiPassOptimizer {
    /// Creates an optimizer with the given time budget.
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            max_passes: None,
        }
    }

    /// Caps the number of passes.
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.max_passes = Some(max_passes.max(1));
        self
    }

    /// Searches for the best-filling assignment and leaves it in `roster`.
    ///
    /// Volunteer accumulators in the result are rebuilt from the winning
    /// pass, not left over from the last one.
    pub fn run<R, C>(
        &self,
        roster: &mut Roster,
        ranking: &RankingEngine,
        rng: &mut R,
        clock: &C,
    ) -> OptimizerReport
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        let baseline = Baseline::capture(roster);
        let pass = GreedyPass::new(ranking);
        let mut state = SearchState::Searching {
            deadline: clock.now().checked_add(self.budget),
        };
        let mut best: Option<BestPass> = None;
        let mut passes = 0u32;

        while let SearchState::Searching { deadline } = state {
            baseline.restore(roster);
            let mut slots = generate_slots(roster);
            shuffle_slots(&mut slots, rng);
            let conflicts = pass.run(roster, &slots);
            passes += 1;

            let fill_rate = roster.fill_rate();
            if best.as_ref().map_or(true, |b| fill_rate > b.fill_rate) {
                debug!(event = "optimizer_improved", pass = passes, fill_rate);
                best = Some(BestPass {
                    fill_rate,
                    assignments: roster.shift_assignments(),
                    conflicts,
                });
            }

            let best_rate = best.as_ref().map_or(0.0, |b| b.fill_rate);
            state = self.next_state(best_rate, passes, deadline, clock);
        }

        let stop_reason = match state {
            SearchState::Done(reason) => reason,
            SearchState::Searching { .. } => StopReason::BudgetExhausted,
        };

        let (best_fill_rate, conflicts) = match best {
            Some(b) => {
                baseline.apply(roster, &b.assignments);
                (b.fill_rate, b.conflicts)
            }
            None => (roster.fill_rate(), Vec::new()),
        };

        info!(
            event = "optimizer_end",
            passes,
            best_fill_rate,
            reason = stop_reason.as_str(),
        );

        OptimizerReport {
            passes,
            best_fill_rate,
            stop_reason,
            conflicts,
        }
    }

    fn next_state<C: Clock + ?Sized>(
        &self,
        best_rate: f64,
        passes: u32,
        deadline: Option<Instant>,
        clock: &C,
    ) -> SearchState {
        if best_rate >= 1.0 {
            return SearchState::Done(StopReason::Perfect);
        }
        if self.max_passes.is_some_and(|cap| passes >= cap) {
            return SearchState::Done(StopReason::PassLimit);
        }
        match deadline {
            Some(d) if clock.now() < d => SearchState::Searching { deadline },
            _ => SearchState::Done(StopReason::BudgetExhausted),
        }
    }
}
