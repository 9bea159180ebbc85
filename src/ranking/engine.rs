//! Rule engine for multi-criteria candidate selection.
//!
//! Composes ranking rules with configurable evaluation modes and
//! tie-breaking strategies.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{CandidateContext, CandidateRule};
use crate::models::Volunteer;

/// How multiple rules are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Keep the earliest candidate in enumeration order (default).
    #[default]
    FirstSeen,
    /// Deterministic by volunteer ID (lexicographic).
    ById,
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn CandidateRule>,
    weight: f64,
}

/// A composable rule engine for candidate selection.
///
/// # Example
/// ```
/// use u_roster::models::Volunteer;
/// use u_roster::ranking::{CandidateContext, RankingEngine};
/// use u_roster::ranking::rules;
///
/// let a = Volunteer::new("a").with_group("A");
/// let b = Volunteer::new("b").with_group("A");
/// let engine = RankingEngine::new().with_rule(rules::LeastHours);
///
/// // Equal hours: first seen wins.
/// assert_eq!(engine.select_best(&[&a, &b], &CandidateContext::default()), Some(0));
/// ```
#[derive(Clone)]
pub struct RankingEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RankingEngine {
    /// Creates an empty rule engine.
    ///
    /// With no rules every candidate ties and the final tie-breaker decides.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::FirstSeen,
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule (weight 1.0).
    pub fn with_rule<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: CandidateRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Adds a tie-breaking rule (weight 0.0, used only in Sequential mode).
    pub fn with_tie_breaker<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 0.0,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// Returns the index of the preferred candidate.
    ///
    /// A later candidate replaces the current best only when it compares
    /// strictly better, so full ties keep the earliest one.
    pub fn select_best(
        &self,
        candidates: &[&Volunteer],
        context: &CandidateContext,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, cand) in candidates.iter().enumerate() {
            match best {
                None => best = Some(i),
                Some(b) => {
                    if self.compare(cand, candidates[b], context) == Ordering::Less {
                        best = Some(i);
                    }
                }
            }
        }
        best
    }

    fn compare(&self, a: &Volunteer, b: &Volunteer, context: &CandidateContext) -> Ordering {
        let by_rules = match self.mode {
            EvaluationMode::Sequential => self.compare_sequential(a, b, context),
            EvaluationMode::Weighted => {
                let score_a = self.weighted_score(a, context);
                let score_b = self.weighted_score(b, context);
                if (score_a - score_b).abs() > self.epsilon {
                    score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal)
                } else {
                    Ordering::Equal
                }
            }
        };
        if by_rules != Ordering::Equal {
            return by_rules;
        }

        match self.tie_breaker {
            TieBreaker::FirstSeen => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }

    fn compare_sequential(
        &self,
        a: &Volunteer,
        b: &Volunteer,
        context: &CandidateContext,
    ) -> Ordering {
        for wr in &self.rules {
            let score_a = wr.rule.evaluate(a, context);
            let score_b = wr.rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    fn weighted_score(&self, volunteer: &Volunteer, context: &CandidateContext) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(volunteer, context) * wr.weight)
            .sum()
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
