//! Cross-cutting error types for rentdesk.
//!
//! This module defines the lifecycle errors every layer understands. Storage
//! errors (`DatabaseError`) live in `rentdesk-db` and wrap these; the HTTP
//! layer maps each variant to a status code.

use thiserror::Error;

use crate::enums::{EntityType, MaintenanceStatus};

/// Errors raised by lifecycle operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: i64 },

    /// A status change was requested that the transition table does not permit.
    #[error("Invalid state transition: maintenance request {id} from {from} to {to}")]
    InvalidTransition {
        id: i64,
        from: MaintenanceStatus,
        to: MaintenanceStatus,
        allowed: Vec<MaintenanceStatus>,
    },

    /// The acting role lacks rights for the requested operation.
    #[error("Not authorized: {reason}")]
    Unauthorized { reason: String },

    /// Submitted data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Build an `InvalidTransition` carrying the states reachable from `from`.
    #[must_use]
    pub fn invalid_transition(
        id: i64,
        from: MaintenanceStatus,
        to: MaintenanceStatus,
    ) -> Self {
        Self::InvalidTransition {
            id,
            from,
            to,
            allowed: from.allowed_next_states().to_vec(),
        }
    }
}
