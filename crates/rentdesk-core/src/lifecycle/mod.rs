//! Maintenance request lifecycle rules.
//!
//! Everything here is pure: functions take the current record and the acting
//! identity and either return the next record or a `CoreError`. The store in
//! `rentdesk-db` reads, calls into this module, and writes the result, so a
//! rejected operation never reaches the database.

mod listing;
mod stats;
mod submission;
mod transition;

pub use listing::ListFilter;
pub use stats::MaintenanceStats;
pub use submission::{NewMaintenanceRequest, SubmissionRules, resolve_tenant};
pub use transition::{
    TransitionFields, action_label, authorize_view, next_states, plan_note, plan_transition,
};
