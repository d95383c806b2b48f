//! Request and response bodies for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentdesk_core::enums::{MaintenanceStatus, Role, SortOrder};
use rentdesk_core::identity::Actor;
use rentdesk_core::lifecycle::{ListFilter, TransitionFields};
use rentdesk_core::timestamps::lenient_option;

/// Query string of `GET /maintenance-requests`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub role: Role,
    pub user_id: i64,
    pub status: Option<MaintenanceStatus>,
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
}

impl ListQuery {
    #[must_use]
    pub const fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }

    #[must_use]
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            status: self.status,
            search: self.search.clone(),
            sort: self.sort.unwrap_or_default(),
        }
    }
}

/// Query string of `GET /maintenance-requests/stats`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub owner_id: i64,
}

/// Body of `PATCH /maintenance-requests/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionBody {
    pub status: MaintenanceStatus,
    /// RFC 3339 date-time or bare `YYYY-MM-DD`.
    #[serde(default, with = "lenient_option")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl TransitionBody {
    #[must_use]
    pub fn fields(&self) -> TransitionFields {
        TransitionFields {
            scheduled_date: self.scheduled_date,
            notes: self.notes.clone(),
            assigned_to: self.assigned_to.clone(),
        }
    }
}

/// Body of `POST /maintenance-requests/{id}/notes`.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteBody {
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn transition_body_accepts_bare_date() {
        let body: TransitionBody =
            serde_json::from_str(r#"{"status":"scheduled","scheduledDate":"2025-06-01"}"#).unwrap();
        assert_eq!(body.status, MaintenanceStatus::Scheduled);
        assert_eq!(
            body.fields().scheduled_date,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn transition_body_optional_fields_default() {
        let body: TransitionBody = serde_json::from_str(r#"{"status":"in_progress"}"#).unwrap();
        assert_eq!(body.fields(), TransitionFields::default());
    }

    #[test]
    fn transition_body_rejects_bad_date() {
        let result = serde_json::from_str::<TransitionBody>(
            r#"{"status":"scheduled","scheduledDate":"soon"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn list_query_defaults_to_newest_first() {
        let query = ListQuery {
            role: Role::Tenant,
            user_id: 101,
            status: None,
            search: None,
            sort: None,
        };
        assert_eq!(query.filter().sort, SortOrder::Desc);
        assert_eq!(query.actor(), Actor::tenant(101));
    }
}
