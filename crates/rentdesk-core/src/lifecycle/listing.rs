use std::cmp::Ordering;

use crate::entities::MaintenanceListing;
use crate::enums::{MaintenanceStatus, Role, SortOrder};
use crate::identity::Actor;

/// Narrowing and ordering applied to a role's visible requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<MaintenanceStatus>,
    /// Case-insensitive substring matched against issue, description,
    /// tenant name, unit number and property name.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl ListFilter {
    #[must_use]
    pub fn matches(&self, listing: &MaintenanceListing) -> bool {
        if self.status.is_some_and(|s| s != listing.request.status) {
            return false;
        }
        let Some(needle) = self.needle() else {
            return true;
        };
        [
            listing.request.issue.as_str(),
            listing.request.description.as_str(),
            listing.tenant_name.as_str(),
            listing.request.unit_number.as_str(),
            listing.property_name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filter and sort `rows` for `actor`.
    ///
    /// Rows that belong to another tenant are dropped for tenant actors even
    /// if the caller's query let them through.
    #[must_use]
    pub fn apply(&self, actor: &Actor, rows: Vec<MaintenanceListing>) -> Vec<MaintenanceListing> {
        let mut rows: Vec<_> = rows
            .into_iter()
            .filter(|l| actor.role != Role::Tenant || l.request.tenant_id == actor.user_id)
            .filter(|l| self.matches(l))
            .collect();
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }

    fn compare(&self, a: &MaintenanceListing, b: &MaintenanceListing) -> Ordering {
        let oldest_first = a
            .request
            .created_at
            .cmp(&b.request.created_at)
            .then(a.request.id.cmp(&b.request.id));
        match self.sort {
            SortOrder::Asc => oldest_first,
            SortOrder::Desc => oldest_first.reverse(),
        }
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MaintenanceRequest;
    use crate::enums::Priority;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn listing(id: i64, tenant_id: i64, status: MaintenanceStatus, hours: i64) -> MaintenanceListing {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap() + Duration::hours(hours);
        MaintenanceListing {
            request: MaintenanceRequest {
                id,
                property_id: 1,
                unit_number: format!("10{id}"),
                tenant_id,
                issue: format!("Issue {id}"),
                description: "Something is broken here".into(),
                status,
                priority: Priority::Medium,
                created_at: at,
                updated_at: at,
                scheduled_date: None,
                completed_date: (status == MaintenanceStatus::Completed).then_some(at),
                assigned_to: None,
                notes: None,
            },
            tenant_name: if tenant_id == 101 { "Jane Doe" } else { "Bob Smith" }.into(),
            property_name: "Maple Court".into(),
        }
    }

    fn ids(rows: &[MaintenanceListing]) -> Vec<i64> {
        rows.iter().map(|l| l.request.id).collect()
    }

    fn sample() -> Vec<MaintenanceListing> {
        vec![
            listing(1, 101, MaintenanceStatus::Pending, 1),
            listing(2, 102, MaintenanceStatus::Urgent, 3),
            listing(3, 101, MaintenanceStatus::Completed, 2),
            listing(4, 102, MaintenanceStatus::Pending, 3),
        ]
    }

    #[test]
    fn default_sort_is_newest_first_with_id_tiebreak() {
        let rows = ListFilter::default().apply(&Actor::landlord(1), sample());
        assert_eq!(ids(&rows), vec![4, 2, 3, 1]);
    }

    #[test]
    fn ascending_sort() {
        let filter = ListFilter {
            sort: SortOrder::Asc,
            ..ListFilter::default()
        };
        assert_eq!(ids(&filter.apply(&Actor::landlord(1), sample())), vec![1, 3, 2, 4]);
    }

    #[test]
    fn tenant_sees_only_own_rows() {
        let rows = ListFilter::default().apply(&Actor::tenant(101), sample());
        assert_eq!(ids(&rows), vec![3, 1]);
        assert!(rows.iter().all(|l| l.request.tenant_id == 101));
    }

    #[test]
    fn status_filter() {
        let filter = ListFilter {
            status: Some(MaintenanceStatus::Pending),
            ..ListFilter::default()
        };
        assert_eq!(ids(&filter.apply(&Actor::landlord(1), sample())), vec![4, 1]);
    }

    #[test]
    fn search_covers_tenant_name_case_insensitively() {
        let filter = ListFilter {
            search: Some("  bob ".into()),
            ..ListFilter::default()
        };
        assert_eq!(ids(&filter.apply(&Actor::landlord(1), sample())), vec![4, 2]);
    }

    #[test]
    fn search_covers_unit_and_property() {
        let by_unit = ListFilter {
            search: Some("103".into()),
            ..ListFilter::default()
        };
        assert_eq!(ids(&by_unit.apply(&Actor::landlord(1), sample())), vec![3]);

        let by_property = ListFilter {
            search: Some("MAPLE".into()),
            ..ListFilter::default()
        };
        assert_eq!(by_property.apply(&Actor::landlord(1), sample()).len(), 4);
    }

    #[test]
    fn blank_search_matches_everything() {
        let filter = ListFilter {
            search: Some("   ".into()),
            ..ListFilter::default()
        };
        assert_eq!(filter.apply(&Actor::landlord(1), sample()).len(), 4);
    }

    #[test]
    fn no_match_yields_empty() {
        let filter = ListFilter {
            search: Some("elevator".into()),
            ..ListFilter::default()
        };
        assert!(filter.apply(&Actor::landlord(1), sample()).is_empty());
    }
}
