use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{MaintenanceStatus, Priority};

/// One reported issue, tied to a single property/unit and the tenant who raised it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: i64,
    pub property_id: i64,
    pub unit_number: String,
    pub tenant_id: i64,
    /// Short title.
    pub issue: String,
    pub description: String,
    pub status: MaintenanceStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the request enters `scheduled`; kept after it leaves.
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Present iff `status == completed`.
    pub completed_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

/// A request joined with the names the list view searches over.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceListing {
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub tenant_name: String,
    pub property_name: String,
}
