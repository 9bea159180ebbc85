//! Volunteer shift assignment engine.
//!
//! Turns volunteers, shifts and already-committed assignments into a
//! constraint-satisfying (or best-effort) roster with diagnostics for
//! every position that could not be filled.
//!
//! # Algorithm
//!
//! 1. Prefill committed assignments onto the roster (no constraint checks).
//! 2. Expand every shift's open headcount into one slot per position.
//! 3. Optionally shuffle the slots.
//! 4. For each slot, filter the group's members by eligibility and take the
//!    best candidate according to the ranking strategy.
//! 5. In multi-pass mode, repeat 2-4 from the post-prefill state until the
//!    roster is full or the time budget runs out, keeping the best pass.
//!
//! The heuristic is randomized and not optimal. Unfillable slots are not
//! errors; they surface as [`ConflictReason`]s and in `unfilled_shifts`.
//!
//! # KPI
//!
//! [`RosterKpi`] reports fill rate, hour dispersion, the 0-100 fairness
//! score, per-group hours and per-volunteer utilization.

pub mod diagnostics;
mod greedy;
mod kpi;
mod optimizer;
mod slots;

pub use greedy::{assign_single_pass, GreedyPass};
pub use kpi::{fairness_score, hour_stats, RosterKpi};
pub use optimizer::{Clock, MultiPassOptimizer, OptimizerReport, StopReason, SystemClock};
pub use slots::{generate_slots, shuffle_slots, Slot};

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{AssignMode, SchedulerConfig};
use crate::error::{Result, RosterError};
use crate::models::{Assignment, ConflictReason, Roster, Shift, Volunteer};
use crate::ranking::Strategy;
use crate::validation::validate_input;

/// Input container for one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Available volunteers.
    pub volunteers: Vec<Volunteer>,
    /// Shifts to staff.
    #[serde(alias = "shifts")]
    pub unassigned_shifts: Vec<Shift>,
    /// Assignments already committed elsewhere.
    #[serde(default)]
    pub current_assignments: Vec<Assignment>,
    /// Overrides the configured ranking strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
}

impl ScheduleRequest {
    /// Creates a request with no prefill.
    pub fn new(volunteers: Vec<Volunteer>, shifts: Vec<Shift>) -> Self {
        Self {
            volunteers,
            unassigned_shifts: shifts,
            current_assignments: Vec::new(),
            strategy: None,
        }
    }

    /// Sets the committed assignments.
    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.current_assignments = assignments;
        self
    }

    /// Overrides the ranking strategy for this run.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Decodes a JSON request body.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Per-volunteer totals in an outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerSummary {
    /// Hours held after the run.
    pub assigned_hours: f64,
    /// Shift IDs held after the run.
    pub assigned_shifts: Vec<String>,
}

/// Result of a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Shift ID to assigned volunteer IDs, in assignment order.
    pub assigned_shifts: BTreeMap<String, Vec<String>>,
    /// Shifts with at least one open position, in input order.
    pub unfilled_shifts: Vec<String>,
    /// Why open positions could not be filled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<ConflictReason>,
    /// Hour-distribution fairness (0..=100).
    pub fairness_score: f64,
    /// Volunteer ID to hour and shift totals.
    pub volunteers: BTreeMap<String, VolunteerSummary>,
    /// Greedy passes run.
    #[serde(default)]
    pub passes: u32,
}

impl ScheduleOutcome {
    /// Snapshots a finished roster.
    pub fn from_roster(roster: &Roster, conflicts: Vec<ConflictReason>, passes: u32) -> Self {
        let assigned_shifts = roster
            .shifts()
            .iter()
            .map(|s| (s.id.clone(), s.assigned.clone()))
            .collect();
        let volunteers = roster
            .volunteers()
            .iter()
            .map(|v| {
                (
                    v.id.clone(),
                    VolunteerSummary {
                        assigned_hours: v.assigned_hours,
                        assigned_shifts: v.assigned_shifts.clone(),
                    },
                )
            })
            .collect();

        Self {
            assigned_shifts,
            unfilled_shifts: roster.unfilled_shift_ids(),
            conflicts,
            fairness_score: fairness_score(roster.volunteers()),
            volunteers,
            passes,
        }
    }

    /// Whether every required position was filled.
    pub fn is_complete(&self) -> bool {
        self.unfilled_shifts.is_empty()
    }

    /// Encodes the outcome as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Volunteer shift scheduler.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use u_roster::config::SchedulerConfig;
/// use u_roster::models::{Shift, Volunteer};
/// use u_roster::scheduler::{ScheduleRequest, Scheduler};
///
/// let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 3, 1, 11, 0, 0).unwrap();
/// let request = ScheduleRequest::new(
///     vec![Volunteer::new("v1").with_group("A").with_max_hours(10.0)],
///     vec![Shift::new("s1", start, end).with_requirement("A", 1)],
/// );
///
/// let scheduler = Scheduler::new(SchedulerConfig::default().with_seed(7));
/// let outcome = scheduler.run(request).unwrap();
/// assert_eq!(outcome.assigned_shifts["s1"], vec!["v1"]);
/// assert!(outcome.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Validates the request, prefills, and assigns.
    ///
    /// Accumulators carried in the request's volunteers and shifts are
    /// discarded; only `current_assignments` seed the run.
    pub fn run(&self, request: ScheduleRequest) -> Result<ScheduleOutcome> {
        self.config.validate()?;
        validate_input(&request.volunteers, &request.unassigned_shifts)
            .map_err(RosterError::Validation)?;

        let strategy = request.strategy.unwrap_or(self.config.strategy);
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut roster = Roster::new(request.volunteers, request.unassigned_shifts);
        roster.reset();
        roster.prefill(&request.current_assignments);

        Ok(self.solve(&mut roster, strategy, &mut rng, &SystemClock))
    }

    /// Decodes a JSON request, runs it, and encodes the outcome.
    pub fn run_json(&self, body: &str) -> Result<String> {
        let request = ScheduleRequest::from_json_str(body)?;
        self.run(request)?.to_json()
    }

    /// Assigns open positions on an already prefilled roster.
    pub fn solve<R, C>(
        &self,
        roster: &mut Roster,
        strategy: Strategy,
        rng: &mut R,
        clock: &C,
    ) -> ScheduleOutcome
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        let ranking = strategy.engine();
        let (conflicts, passes) = match self.config.mode {
            AssignMode::SinglePass => {
                let conflicts = assign_single_pass(roster, &ranking, self.config.shuffle, rng);
                (conflicts, 1)
            }
            AssignMode::MultiPass => {
                let mut optimizer = MultiPassOptimizer::new(self.config.time_budget());
                if let Some(cap) = self.config.max_passes {
                    optimizer = optimizer.with_max_passes(cap);
                }
                let report = optimizer.run(roster, &ranking, rng, clock);
                (report.conflicts, report.passes)
            }
        };

        let outcome = ScheduleOutcome::from_roster(roster, conflicts, passes);
        info!(
            event = "schedule_end",
            strategy = ?strategy,
            passes,
            fill_rate = roster.fill_rate(),
            unfilled = outcome.unfilled_shifts.len(),
            conflicts = outcome.conflicts.len(),
            fairness_score = outcome.fairness_score,
        );
        outcome
    }
}
