//! Roster quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | Filled required positions / required positions |
//! | Mean Hours | Average assigned hours per volunteer |
//! | Hour Std Dev | Population standard deviation of assigned hours |
//! | Fairness Score | max(0, (1 - stddev/mean) * 100) |
//! | Group Hours | Assigned hours summed per group |
//! | Utilization | assigned_hours / max_hours per volunteer |

use std::collections::BTreeMap;

use crate::models::{Roster, Volunteer};

/// Fairness of the hour distribution on a 0..=100 scale.
///
/// 100 means every volunteer holds the same hours. With no volunteers or
/// no hours assigned at all the score is 100.
pub fn fairness_score(volunteers: &[Volunteer]) -> f64 {
    let (mean, stddev) = hour_stats(volunteers);
    if volunteers.is_empty() || mean <= 0.0 {
        return 100.0;
    }
    ((1.0 - stddev / mean) * 100.0).max(0.0)
}

/// Mean and population standard deviation of assigned hours.
///
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn hour_stats(volunteers: &[Volunteer]) -> (f64, f64) {
    if volunteers.is_empty() {
        return (0.0, 0.0);
    }
    let n = volunteers.len() as f64;
    let mean = volunteers.iter().map(|v| v.assigned_hours).sum::<f64>() / n;
    let variance = volunteers
        .iter()
        .map(|v| {
            let diff = v.assigned_hours - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

/// Roster performance indicators.
#[derive(Debug, Clone)]
pub struct RosterKpi {
    /// Required positions across all shifts.
    pub required_slots: u32,
    /// Required positions filled (capped per shift and group).
    pub filled_slots: u32,
    /// `filled_slots / required_slots` (1.0 when nothing is required).
    pub fill_rate: f64,
    /// Shifts with at least one open position.
    pub unfilled_shifts: usize,
    /// Mean assigned hours.
    pub mean_hours: f64,
    /// Population standard deviation of assigned hours.
    pub stddev_hours: f64,
    /// Fairness score (0..=100).
    pub fairness_score: f64,
    /// Assigned hours per group; `None` collects ungrouped volunteers.
    pub hours_by_group: BTreeMap<Option<String>, f64>,
    /// Share of `max_hours` used per volunteer.
    pub utilization_by_volunteer: BTreeMap<String, f64>,
}

impl RosterKpi {
    /// Computes KPIs from the roster's current state.
    pub fn calculate(roster: &Roster) -> Self {
        let volunteers = roster.volunteers();
        let (mean_hours, stddev_hours) = hour_stats(volunteers);

        let mut hours_by_group: BTreeMap<Option<String>, f64> = BTreeMap::new();
        let mut utilization_by_volunteer = BTreeMap::new();
        for v in volunteers {
            *hours_by_group.entry(v.group.clone()).or_insert(0.0) += v.assigned_hours;
            utilization_by_volunteer.insert(v.id.clone(), v.utilization());
        }

        Self {
            required_slots: roster.required_slots(),
            filled_slots: roster.filled_slots(),
            fill_rate: roster.fill_rate(),
            unfilled_shifts: roster.unfilled_shift_ids().len(),
            mean_hours,
            stddev_hours,
            fairness_score: fairness_score(volunteers),
            hours_by_group,
            utilization_by_volunteer,
        }
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, min_fairness: f64) -> bool {
        self.fill_rate >= min_fill_rate && self.fairness_score >= min_fairness
    }
}
