//! Scheduler configuration.
//!
//! Load from TOML to control assignment mode, shuffling, strategy and the
//! search budget without code changes.
//!
//! ```
//! use u_roster::config::{AssignMode, SchedulerConfig};
//! use u_roster::ranking::Strategy;
//! use std::time::Duration;
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     mode = "multi_pass"
//!     strategy = "maximize_fairness"
//!     time_budget_ms = 500
//!     random_seed = 7
//! "#).unwrap();
//!
//! assert_eq!(config.mode, AssignMode::MultiPass);
//! assert_eq!(config.strategy, Strategy::MaximizeFairness);
//! assert_eq!(config.time_budget(), Duration::from_millis(500));
//! assert!(config.shuffle);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::ranking::Strategy;

/// How assignments are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignMode {
    /// One greedy pass.
    #[default]
    SinglePass,
    /// Repeated shuffled passes within a time budget, keeping the best.
    MultiPass,
}

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Assignment mode.
    pub mode: AssignMode,
    /// Shuffle slots before a single pass. Multi-pass always shuffles.
    pub shuffle: bool,
    /// Candidate ranking strategy (a request may override it).
    pub strategy: Strategy,
    /// Multi-pass wall-clock budget in milliseconds. 0 = first pass only.
    pub time_budget_ms: u64,
    /// Optional hard cap on multi-pass iterations.
    pub max_passes: Option<u32>,
    /// Seed for reproducible runs. `None` = fresh OS-seeded generator per run.
    pub random_seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mode: AssignMode::SinglePass,
            shuffle: true,
            strategy: Strategy::MinimizeUnfilled,
            time_budget_ms: 2_000,
            max_passes: None,
            random_seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks value consistency.
    pub fn validate(&self) -> Result<()> {
        if self.max_passes == Some(0) {
            return Err(RosterError::InvalidConfig(
                "max_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Multi-pass budget as a `Duration`.
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Sets the assignment mode.
    pub fn with_mode(mut self, mode: AssignMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables single-pass shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the ranking strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the multi-pass budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Caps multi-pass iterations.
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}
