//! The team roster state machine.
//!
//! Per member id: absent → draft → customized → removed. A removed id can be
//! added again as a fresh draft; re-customizing a member replaces it in place.
//!
//! Move selection is only checked when a member is committed. DVs and level
//! are clamped on input by the `RosterMember` setters.

pub mod manager;
pub mod stats;
pub mod validation;

pub use manager::{RosterManager, RosterOutcome, RosterRejection, MAX_ROSTER_SIZE};
pub use stats::{compute_derived_stats, derive_stat, derive_stats};
pub use validation::{validate_composition, Violation};
