use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, Role};
use crate::errors::CoreError;
use crate::identity::Actor;

/// Length limits applied to new requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionRules {
    /// Minimum description length, in characters, after trimming.
    pub min_description_len: usize,
    /// Maximum issue title length, in characters, after trimming.
    pub max_issue_len: usize,
}

impl Default for SubmissionRules {
    fn default() -> Self {
        Self {
            min_description_len: 10,
            max_issue_len: 100,
        }
    }
}

/// Fields a caller supplies when reporting an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceRequest {
    pub property_id: i64,
    pub unit_number: String,
    pub issue: String,
    pub description: String,
    pub priority: Priority,
    /// Only meaningful when a manager files on a tenant's behalf.
    #[serde(default)]
    pub tenant_id: Option<i64>,
}

impl NewMaintenanceRequest {
    /// Copy with surrounding whitespace stripped from the text fields.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            unit_number: self.unit_number.trim().to_string(),
            issue: self.issue.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self.clone()
        }
    }
}

impl SubmissionRules {
    /// Check the text fields of a submission.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    pub fn validate(&self, input: &NewMaintenanceRequest) -> Result<(), CoreError> {
        let issue_len = input.issue.trim().chars().count();
        if issue_len == 0 {
            return Err(CoreError::Validation("issue must not be empty".into()));
        }
        if issue_len > self.max_issue_len {
            return Err(CoreError::Validation(format!(
                "issue must be at most {} characters",
                self.max_issue_len
            )));
        }
        if input.description.trim().chars().count() < self.min_description_len {
            return Err(CoreError::Validation(format!(
                "description must be at least {} characters",
                self.min_description_len
            )));
        }
        if input.unit_number.trim().is_empty() {
            return Err(CoreError::Validation("unit number must not be empty".into()));
        }
        Ok(())
    }
}

/// Decide which tenant a new request is filed for.
///
/// Tenants file for themselves. Managers file on a tenant's behalf, only on
/// properties they own, and must name the tenant.
///
/// # Errors
///
/// `Unauthorized` when a tenant names someone else or a manager does not own
/// the property; `Validation` when a manager omits the tenant.
pub fn resolve_tenant(
    actor: &Actor,
    requested: Option<i64>,
    property_owner: i64,
) -> Result<i64, CoreError> {
    match actor.role {
        Role::Tenant => match requested {
            Some(id) if id != actor.user_id => Err(CoreError::unauthorized(
                "tenants may only submit requests for themselves",
            )),
            _ => Ok(actor.user_id),
        },
        Role::Landlord | Role::PropertyManager => {
            if !actor.manages(property_owner) {
                return Err(CoreError::unauthorized(format!(
                    "user {} does not manage this property",
                    actor.user_id
                )));
            }
            requested.ok_or_else(|| {
                CoreError::Validation("tenantId is required when filing for a tenant".into())
            })
        }
    }
}
