//! Maintenance request column changes.

use chrono::{DateTime, Utc};
use rentdesk_core::entities::MaintenanceRequest;
use rentdesk_core::enums::MaintenanceStatus;

use crate::helpers::to_sql_timestamp;

/// Columns that differ between a stored request and its planned successor.
///
/// Nullable columns use `Option<Option<T>>`: the outer `Some` means "write",
/// the inner value is what gets written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceUpdate {
    pub status: Option<MaintenanceStatus>,
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    pub completed_date: Option<Option<DateTime<Utc>>>,
    pub assigned_to: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
    (before != after).then(|| after.clone())
}

impl MaintenanceUpdate {
    /// Diff two versions of the same request.
    ///
    /// `updated_at` is always written so self-loops still bump it.
    #[must_use]
    pub fn diff(before: &MaintenanceRequest, after: &MaintenanceRequest) -> Self {
        Self {
            status: changed(&before.status, &after.status),
            scheduled_date: changed(&before.scheduled_date, &after.scheduled_date),
            completed_date: changed(&before.completed_date, &after.completed_date),
            assigned_to: changed(&before.assigned_to, &after.assigned_to),
            notes: changed(&before.notes, &after.notes),
            updated_at: Some(after.updated_at),
        }
    }

    /// SET clauses and their bound values, numbered from `?1`.
    #[must_use]
    pub fn assignments(&self) -> (Vec<String>, Vec<libsql::Value>) {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        let mut push = |column: &str, value: libsql::Value| {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        };

        if let Some(status) = self.status {
            push("status", status.as_str().into());
        }
        if let Some(date) = &self.scheduled_date {
            push("scheduled_date", optional_timestamp(date.as_ref()));
        }
        if let Some(date) = &self.completed_date {
            push("completed_date", optional_timestamp(date.as_ref()));
        }
        if let Some(assignee) = &self.assigned_to {
            push(
                "assigned_to",
                assignee.clone().map_or(libsql::Value::Null, Into::into),
            );
        }
        if let Some(notes) = &self.notes {
            push("notes", notes.clone().map_or(libsql::Value::Null, Into::into));
        }
        if let Some(at) = &self.updated_at {
            push("updated_at", to_sql_timestamp(at).into());
        }

        (sets, params)
    }
}

fn optional_timestamp(dt: Option<&DateTime<Utc>>) -> libsql::Value {
    dt.map_or(libsql::Value::Null, |dt| to_sql_timestamp(dt).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rentdesk_core::enums::Priority;

    fn request() -> MaintenanceRequest {
        let at = Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap();
        MaintenanceRequest {
            id: 1,
            property_id: 1,
            unit_number: "203".into(),
            tenant_id: 101,
            issue: "Broken Heater".into(),
            description: "Heater making loud noise".into(),
            status: MaintenanceStatus::InProgress,
            priority: Priority::High,
            created_at: at,
            updated_at: at,
            scheduled_date: None,
            completed_date: None,
            assigned_to: Some("Mike".into()),
            notes: None,
        }
    }

    #[test]
    fn completion_diff() {
        let before = request();
        let done_at = before.created_at + Duration::hours(1);
        let after = MaintenanceRequest {
            status: MaintenanceStatus::Completed,
            completed_date: Some(done_at),
            updated_at: done_at,
            ..before.clone()
        };

        let update = MaintenanceUpdate::diff(&before, &after);
        assert_eq!(update.status, Some(MaintenanceStatus::Completed));
        assert_eq!(update.completed_date, Some(Some(done_at)));
        assert_eq!(update.assigned_to, None);

        let (sets, params) = update.assignments();
        assert_eq!(
            sets,
            vec!["status = ?1", "completed_date = ?2", "updated_at = ?3"]
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn cleared_column_binds_null() {
        let before = request();
        let after = MaintenanceRequest {
            assigned_to: None,
            ..before.clone()
        };

        let (sets, params) = MaintenanceUpdate::diff(&before, &after).assignments();
        assert_eq!(sets, vec!["assigned_to = ?1", "updated_at = ?2"]);
        assert!(matches!(params[0], libsql::Value::Null));
    }

    #[test]
    fn identical_versions_only_touch_updated_at() {
        let before = request();
        let (sets, _) = MaintenanceUpdate::diff(&before, &before).assignments();
        assert_eq!(sets, vec!["updated_at = ?1"]);
    }
}
