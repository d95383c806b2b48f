//! Shared test utilities for rentdesk-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use rentdesk_core::lifecycle::SubmissionRules;

    use crate::RentDb;
    use crate::service::RentService;

    pub const LANDLORD: i64 = 1;
    pub const OTHER_LANDLORD: i64 = 2;
    pub const TENANT: i64 = 101;
    pub const OTHER_TENANT: i64 = 102;
    pub const PROPERTY: i64 = 1;
    pub const OTHER_PROPERTY: i64 = 2;

    /// Create an in-memory service with default submission rules.
    pub async fn test_service() -> RentService {
        let db = RentDb::open_local(":memory:").await.unwrap();
        RentService::from_db(db, SubmissionRules::default())
    }

    /// Create an in-memory service with two landlords, two tenants, and one
    /// property per landlord.
    ///
    /// Landlord 1 owns "Maple Court" (units 101, 102, 203); landlord 2 owns
    /// "Birch House" (unit 1A).
    pub async fn seeded_service() -> RentService {
        let svc = test_service().await;
        svc.db()
            .conn()
            .execute_batch(
                "INSERT INTO users (id, name, email, role) VALUES
                    (1, 'Lena Landlord', 'lena@example.com', 'landlord'),
                    (2, 'Otto Owner', 'otto@example.com', 'landlord'),
                    (101, 'Jane Doe', 'jane@example.com', 'tenant'),
                    (102, 'Bob Smith', 'bob@example.com', 'tenant');
                 INSERT INTO properties (id, name, address, units, owner_id) VALUES
                    (1, 'Maple Court', '12 Maple St', 3, 1),
                    (2, 'Birch House', '4 Birch Rd', 1, 2);
                 INSERT INTO units (property_id, unit_number, rent_amount, is_occupied) VALUES
                    (1, '101', 1200, 1),
                    (1, '102', 1250, 1),
                    (1, '203', 1400, 1),
                    (2, '1A', 950, 1);",
            )
            .await
            .unwrap();
        svc
    }
}
