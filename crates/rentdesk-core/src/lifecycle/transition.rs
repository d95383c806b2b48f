use chrono::{DateTime, Utc};

use crate::entities::MaintenanceRequest;
use crate::enums::{MaintenanceStatus, Priority, Role};
use crate::errors::CoreError;
use crate::identity::Actor;

/// Optional fields carried alongside a status change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionFields {
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Replaces the notes; an empty string clears them.
    pub notes: Option<String>,
    /// Replaces the assignee; an empty string clears it.
    pub assigned_to: Option<String>,
}

impl TransitionFields {
    #[must_use]
    pub const fn scheduled_for(mut self, date: DateTime<Utc>) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }
}

/// Button label for a permitted transition, `None` for any other pair.
#[must_use]
pub const fn action_label(from: MaintenanceStatus, to: MaintenanceStatus) -> Option<&'static str> {
    use MaintenanceStatus::{Completed, InProgress, Pending, Scheduled, Urgent};
    match (from, to) {
        (Pending | Scheduled, InProgress) => Some("Start Work"),
        (Pending, Scheduled) => Some("Schedule"),
        (Pending, Urgent) => Some("Mark Urgent"),
        (InProgress, Completed) => Some("Mark Complete"),
        (InProgress, InProgress) => Some("Update Status"),
        (Scheduled, Scheduled) => Some("Reschedule"),
        (Completed, Pending) => Some("Reopen Request"),
        _ => None,
    }
}

/// Statuses `request` may move to next.
///
/// The transition table for its status, minus `urgent` when the priority is
/// already urgent.
#[must_use]
pub fn next_states(request: &MaintenanceRequest) -> Vec<MaintenanceStatus> {
    request
        .status
        .allowed_next_states()
        .iter()
        .copied()
        .filter(|&next| {
            !(next == MaintenanceStatus::Urgent && request.priority == Priority::Urgent)
        })
        .collect()
}

/// Compute the record that results from moving `current` to `target`.
///
/// Checks run in a fixed order: role, property ownership, transition table,
/// then field rules. Nothing is written; the caller persists the result.
///
/// # Errors
///
/// - `Unauthorized` if the actor is a tenant or does not own the property.
/// - `InvalidTransition` if `(current.status, target)` is not permitted, or
///   if "Mark Urgent" is attempted on a request whose priority is already urgent.
/// - `Validation` if `scheduled_date` is missing for a `scheduled` target or
///   given for any other target.
pub fn plan_transition(
    current: &MaintenanceRequest,
    actor: &Actor,
    property_owner: i64,
    target: MaintenanceStatus,
    fields: &TransitionFields,
    now: DateTime<Utc>,
) -> Result<MaintenanceRequest, CoreError> {
    if !actor.role.can_manage() {
        return Err(CoreError::unauthorized(format!(
            "role {} may not change request status",
            actor.role
        )));
    }
    if !actor.manages(property_owner) {
        return Err(CoreError::unauthorized(format!(
            "user {} does not manage property {}",
            actor.user_id, current.property_id
        )));
    }

    let allowed = next_states(current);
    if !allowed.contains(&target) {
        return Err(CoreError::InvalidTransition {
            id: current.id,
            from: current.status,
            to: target,
            allowed,
        });
    }

    match (target, fields.scheduled_date) {
        (MaintenanceStatus::Scheduled, None) => {
            return Err(CoreError::Validation(
                "scheduledDate is required to schedule a request".into(),
            ));
        }
        (t, Some(_)) if t != MaintenanceStatus::Scheduled => {
            return Err(CoreError::Validation(
                "scheduledDate may only be set when scheduling".into(),
            ));
        }
        _ => {}
    }

    let mut next = current.clone();
    next.status = target;
    next.updated_at = now.max(current.created_at);
    if let Some(date) = fields.scheduled_date {
        next.scheduled_date = Some(date);
    }
    next.completed_date = (target == MaintenanceStatus::Completed).then_some(next.updated_at);
    if let Some(notes) = &fields.notes {
        next.notes = non_blank(notes);
    }
    if let Some(assignee) = &fields.assigned_to {
        next.assigned_to = non_blank(assignee);
    }
    Ok(next)
}

/// Compute the record that results from appending a contact note.
///
/// Tenants may note their own requests; managers may note requests on
/// properties they own. The note is appended on its own line, prefixed
/// with the author's role.
///
/// # Errors
///
/// `Unauthorized` for anyone else, `Validation` for a blank note.
pub fn plan_note(
    current: &MaintenanceRequest,
    actor: &Actor,
    property_owner: i64,
    note: &str,
    now: DateTime<Utc>,
) -> Result<MaintenanceRequest, CoreError> {
    authorize_view(current, actor, property_owner)?;

    let note = note.trim();
    if note.is_empty() {
        return Err(CoreError::Validation("note must not be empty".into()));
    }

    let line = format!("[{}] {note}", actor.role);
    let mut next = current.clone();
    next.notes = Some(match &current.notes {
        Some(existing) => format!("{existing}\n{line}"),
        None => line,
    });
    next.updated_at = now.max(current.created_at);
    Ok(next)
}

/// Check that `actor` may see `request`.
///
/// # Errors
///
/// `Unauthorized` when a tenant asks for another tenant's request or a
/// manager asks about a property they do not own.
pub fn authorize_view(
    request: &MaintenanceRequest,
    actor: &Actor,
    property_owner: i64,
) -> Result<(), CoreError> {
    let allowed = match actor.role {
        Role::Tenant => request.tenant_id == actor.user_id,
        Role::Landlord | Role::PropertyManager => actor.manages(property_owner),
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::unauthorized(format!(
            "maintenance request {} is not visible to user {}",
            request.id, actor.user_id
        )))
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
