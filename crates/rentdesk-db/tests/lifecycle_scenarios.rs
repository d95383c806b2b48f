//! End-to-end lifecycle scenarios against a file-backed database.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use rentdesk_core::enums::{MaintenanceStatus, Priority};
use rentdesk_core::errors::CoreError;
use rentdesk_core::identity::Actor;
use rentdesk_core::lifecycle::{ListFilter, NewMaintenanceRequest, SubmissionRules, TransitionFields};
use rentdesk_db::error::DatabaseError;
use rentdesk_db::service::RentService;

const LANDLORD: i64 = 1;
const TENANT: i64 = 101;
const OTHER_TENANT: i64 = 102;

async fn open(dir: &tempfile::TempDir) -> RentService {
    let path = dir.path().join("rentdesk.db");
    let svc = RentService::new_local(path.to_str().unwrap(), SubmissionRules::default())
        .await
        .unwrap();
    svc.db()
        .conn()
        .execute_batch(
            "INSERT OR IGNORE INTO users (id, name, email, role) VALUES
                (1, 'Lena Landlord', 'lena@example.com', 'landlord'),
                (101, 'Jane Doe', 'jane@example.com', 'tenant'),
                (102, 'Bob Smith', 'bob@example.com', 'tenant');
             INSERT OR IGNORE INTO properties (id, name, address, units, owner_id) VALUES
                (1, 'Maple Court', '12 Maple St', 3, 1);
             INSERT OR IGNORE INTO units (property_id, unit_number, rent_amount, is_occupied) VALUES
                (1, '102', 1250, 1),
                (1, '203', 1400, 1);",
        )
        .await
        .unwrap();
    svc
}

fn heater() -> NewMaintenanceRequest {
    NewMaintenanceRequest {
        property_id: 1,
        unit_number: "203".into(),
        issue: "Broken Heater".into(),
        description: "Heater making loud noise, not heating.".into(),
        priority: Priority::High,
        tenant_id: None,
    }
}

async fn move_to(svc: &RentService, id: i64, path: &[MaintenanceStatus]) {
    let landlord = Actor::landlord(LANDLORD);
    for &target in path {
        let fields = if target == MaintenanceStatus::Scheduled {
            TransitionFields::default().scheduled_for(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        } else {
            TransitionFields::default()
        };
        svc.transition_request(&landlord, id, target, &fields)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn full_lifecycle_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    let svc = open(&dir).await;
    let landlord = Actor::landlord(LANDLORD);

    // Submit as the tenant.
    let request = svc
        .submit_request(&Actor::tenant(TENANT), &heater())
        .await
        .unwrap();
    assert_eq!(request.status, MaintenanceStatus::Pending);
    assert_eq!(request.priority, Priority::High);
    assert_eq!(request.completed_date, None);

    // Landlord schedules it with a bare date.
    let date = rentdesk_core::timestamps::parse_timestamp("2025-06-01").unwrap();
    let scheduled = svc
        .transition_request(
            &landlord,
            request.id,
            MaintenanceStatus::Scheduled,
            &TransitionFields::default().scheduled_for(date),
        )
        .await
        .unwrap();
    assert_eq!(scheduled.status, MaintenanceStatus::Scheduled);
    assert_eq!(scheduled.scheduled_date, Some(date));

    // Tenant may not complete it.
    let err = svc
        .transition_request(
            &Actor::tenant(TENANT),
            request.id,
            MaintenanceStatus::Completed,
            &TransitionFields::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Core(CoreError::Unauthorized { .. })));
    assert_eq!(svc.get_request(request.id).await.unwrap(), scheduled);

    // Work happens; it completes.
    move_to(&svc, request.id, &[MaintenanceStatus::InProgress, MaintenanceStatus::Completed]).await;
    let completed = svc.get_request(request.id).await.unwrap();
    assert_eq!(completed.status, MaintenanceStatus::Completed);
    assert!(completed.completed_date.is_some());

    // completed -> urgent is not in the table.
    let err = svc
        .transition_request(
            &landlord,
            request.id,
            MaintenanceStatus::Urgent,
            &TransitionFields::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DatabaseError::Core(CoreError::InvalidTransition {
            from: MaintenanceStatus::Completed,
            to: MaintenanceStatus::Urgent,
            ..
        })
    ));

    // Reopen clears the completion date.
    let reopened = svc
        .transition_request(
            &landlord,
            request.id,
            MaintenanceStatus::Pending,
            &TransitionFields::default(),
        )
        .await
        .unwrap();
    assert_eq!(reopened.status, MaintenanceStatus::Pending);
    assert_eq!(reopened.completed_date, None);
    assert_eq!(reopened.created_at, request.created_at);

    // The audit trail saw every accepted change.
    let history = svc.request_history(request.id).await.unwrap();
    assert_eq!(history.len(), 5);
}

#[tokio::test]
async fn tenant_listing_excludes_other_tenants() {
    let dir = tempfile::tempdir().unwrap();
    let svc = open(&dir).await;

    svc.submit_request(&Actor::tenant(TENANT), &heater())
        .await
        .unwrap();
    svc.submit_request(
        &Actor::tenant(OTHER_TENANT),
        &NewMaintenanceRequest {
            unit_number: "102".into(),
            ..heater()
        },
    )
    .await
    .unwrap();

    let listings = svc
        .list_requests_for(&Actor::tenant(TENANT), &ListFilter::default())
        .await
        .unwrap();
    assert_eq!(listings.len(), 1);
    assert!(listings.iter().all(|l| l.request.tenant_id == TENANT));
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let svc = open(&dir).await;
        svc.submit_request(&Actor::tenant(TENANT), &heater())
            .await
            .unwrap()
            .id
    };

    let svc = open(&dir).await;
    let request = svc.get_request(id).await.unwrap();
    assert_eq!(request.issue, "Broken Heater");
}

#[rstest]
#[case::pending_to_completed(&[], MaintenanceStatus::Completed)]
#[case::in_progress_to_pending(&[MaintenanceStatus::InProgress], MaintenanceStatus::Pending)]
#[case::scheduled_to_completed(&[MaintenanceStatus::Scheduled], MaintenanceStatus::Completed)]
#[case::completed_to_in_progress(
    &[MaintenanceStatus::InProgress, MaintenanceStatus::Completed],
    MaintenanceStatus::InProgress
)]
#[case::urgent_to_in_progress(&[MaintenanceStatus::Urgent], MaintenanceStatus::InProgress)]
#[case::urgent_to_completed(&[MaintenanceStatus::Urgent], MaintenanceStatus::Completed)]
#[tokio::test]
async fn rejected_pairs_leave_row_unchanged(
    #[case] path: &[MaintenanceStatus],
    #[case] target: MaintenanceStatus,
) {
    let dir = tempfile::tempdir().unwrap();
    let svc = open(&dir).await;
    let request = svc
        .submit_request(&Actor::tenant(TENANT), &heater())
        .await
        .unwrap();
    move_to(&svc, request.id, path).await;
    let before = svc.get_request(request.id).await.unwrap();

    let err = svc
        .transition_request(
            &Actor::landlord(LANDLORD),
            request.id,
            target,
            &TransitionFields::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DatabaseError::Core(CoreError::InvalidTransition { .. })
    ));
    assert_eq!(svc.get_request(request.id).await.unwrap(), before);
}
