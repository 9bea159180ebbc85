//! Rostering domain models.
//!
//! Provides the data types for a volunteer rostering problem and its
//! working state.
//!
//! # Domain Mappings
//!
//! | u-roster | Events | Healthcare | Retail |
//! |----------|--------|------------|--------|
//! | Volunteer | Volunteer/Delegate | Nurse | Clerk |
//! | Group | Role/Team | Ward qualification | Department |
//! | Shift | Time slot | Ward shift | Store shift |
//! | Roster | Event plan | Ward rota | Weekly rota |

mod assignment;
mod roster;
mod shift;
mod volunteer;

pub use assignment::{Assignment, ConflictReason};
pub use roster::Roster;
pub use shift::Shift;
pub use volunteer::Volunteer;
