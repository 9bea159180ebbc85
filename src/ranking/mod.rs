//! Candidate ranking rules and rule engine.
//!
//! When several volunteers are eligible for a slot, the greedy pass asks a
//! [`RankingEngine`] which one to take. Each [`Strategy`] maps to a fixed
//! rule chain.
//!
//! # Usage
//!
//! ```
//! use u_roster::ranking::{RankingEngine, Strategy};
//! use u_roster::ranking::rules;
//!
//! let engine = RankingEngine::new()
//!     .with_rule(rules::LeastHours)
//!     .with_tie_breaker(rules::FewestShifts);
//!
//! let fairness = Strategy::MaximizeFairness.engine();
//! assert_eq!(fairness.rule_names(), vec!["LEAST_HOURS", "FEWEST_SHIFTS"]);
//! ```

mod engine;
pub mod rules;

pub use engine::{EvaluationMode, RankingEngine, TieBreaker};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{Shift, Volunteer};

/// Score returned by a ranking rule.
///
/// Lower scores = preferred candidate.
pub type RuleScore = f64;

/// Per-slot information passed to ranking rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateContext {
    /// Length of the shift being filled, in hours.
    pub shift_hours: f64,
}

impl CandidateContext {
    /// Context for filling a slot on `shift`.
    pub fn for_shift(shift: &Shift) -> Self {
        Self {
            shift_hours: shift.duration_hours(),
        }
    }
}

/// A rule that scores an eligible volunteer for a slot.
///
/// # Score Convention
/// **Lower score = preferred.** The engine picks the lowest-scoring candidate.
pub trait CandidateRule: Send + Sync + Debug {
    /// Rule name (e.g., "LEAST_HOURS").
    fn name(&self) -> &'static str;

    /// Scores a candidate. Lower = preferred.
    fn evaluate(&self, volunteer: &Volunteer, context: &CandidateContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Optimization strategy for candidate selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Least accumulated hours first. The reference greedy rule.
    #[default]
    MinimizeUnfilled,
    /// Least hours, then fewest shifts.
    MaximizeFairness,
    /// Lowest share of `max_hours` used, then least hours, then fewest shifts.
    MinimizeOvertime,
}

impl Strategy {
    /// Builds the rule chain for this strategy.
    pub fn engine(self) -> RankingEngine {
        match self {
            Strategy::MinimizeUnfilled => RankingEngine::new().with_rule(rules::LeastHours),
            Strategy::MaximizeFairness => RankingEngine::new()
                .with_rule(rules::LeastHours)
                .with_tie_breaker(rules::FewestShifts),
            Strategy::MinimizeOvertime => RankingEngine::new()
                .with_rule(rules::LowestUtilization)
                .with_tie_breaker(rules::LeastHours)
                .with_tie_breaker(rules::FewestShifts),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimize_unfilled" => Ok(Strategy::MinimizeUnfilled),
            "maximize_fairness" => Ok(Strategy::MaximizeFairness),
            "minimize_overtime" => Ok(Strategy::MinimizeOvertime),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}
