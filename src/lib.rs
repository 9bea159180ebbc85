//! Volunteer shift rostering for the U-Engine ecosystem.
//!
//! Assigns volunteers to time-boxed shifts under group eligibility, hour
//! ceilings and non-overlap constraints, producing a best-effort roster
//! plus diagnostics for every position that could not be filled.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Volunteer`, `Shift`, `Assignment`,
//!   `ConflictReason`, `Roster`
//! - **`constraints`**: Eligibility predicates (group policy, overlap, capacity)
//! - **`ranking`**: Candidate ranking rules and strategies
//! - **`scheduler`**: Slot generation, greedy pass, multi-pass optimizer, KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, time ranges, hour ceilings)
//! - **`config`**: TOML-loadable scheduler settings
//! - **`export`**: CSV reports
//!
//! # Quick start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use u_roster::{Scheduler, SchedulerConfig, ScheduleRequest, Shift, Volunteer};
//!
//! let day = |h| Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap();
//! let request = ScheduleRequest::new(
//!     vec![
//!         Volunteer::new("ann").with_group("kitchen").with_max_hours(8.0),
//!         Volunteer::new("ben").with_group("kitchen").with_max_hours(8.0),
//!     ],
//!     vec![
//!         Shift::new("breakfast", day(7), day(10)).with_requirement("kitchen", 1),
//!         Shift::new("lunch", day(11), day(14)).with_requirement("kitchen", 1),
//!     ],
//! );
//!
//! let outcome = Scheduler::new(SchedulerConfig::default().with_seed(1))
//!     .run(request)
//!     .unwrap();
//! assert!(outcome.is_complete());
//! assert!((outcome.fairness_score - 100.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod config;
pub mod constraints;
pub mod error;
pub mod export;
pub mod models;
pub mod ranking;
pub mod scheduler;
pub mod validation;

pub use config::{AssignMode, SchedulerConfig};
pub use error::{Result, RosterError};
pub use models::{Assignment, ConflictReason, Roster, Shift, Volunteer};
pub use ranking::Strategy;
pub use scheduler::{ScheduleOutcome, ScheduleRequest, Scheduler};
