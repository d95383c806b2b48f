//! Demo data: one landlord, five tenants, three properties with five units
//! each (three occupied), and one maintenance request per tenant, filed
//! against the first occupied units in order.
//!
//! Requests are filed and advanced through the normal lifecycle methods, so
//! the seeded rows satisfy every invariant and carry an audit history.

use chrono::Duration;

use rentdesk_core::enums::{MaintenanceStatus, Priority, Role};
use rentdesk_core::identity::Actor;
use rentdesk_core::lifecycle::{NewMaintenanceRequest, TransitionFields};

use crate::error::DatabaseError;
use crate::helpers::now;
use crate::service::RentService;

pub const DEMO_LANDLORD_EMAIL: &str = "landlord@example.com";

const PROPERTIES: [(&str, &str, u32); 3] = [
    ("Westview Apartments", "123 Main St, Anytown", 12),
    ("Oakridge Townhomes", "456 Oak Lane, Westfield", 8),
    ("Riverside Apartments", "789 River Dr, Eastshore", 20),
];

const UNITS_PER_PROPERTY: u8 = 5;
const OCCUPIED_PER_PROPERTY: u8 = 3;
const TENANTS: usize = 5;

const ISSUES: [&str; 5] = ["Plumbing", "Electrical", "HVAC", "Appliance", "Structural"];
const PRIORITIES: [Priority; 4] = [Priority::Medium, Priority::High, Priority::Low, Priority::Urgent];

/// What a seeding run created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub landlord_id: i64,
    pub tenants: usize,
    pub properties: usize,
    pub units: usize,
    pub requests: usize,
}

impl RentService {
    /// Insert the demo data set unless the demo landlord already exists.
    ///
    /// Returns `None` when the data was already present.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any insert or transition fails.
    pub async fn seed_demo(&self) -> Result<Option<SeedSummary>, DatabaseError> {
        if self.find_user_by_email(DEMO_LANDLORD_EMAIL).await?.is_some() {
            tracing::debug!("demo data already present");
            return Ok(None);
        }

        let landlord = self
            .create_user("John Doe", DEMO_LANDLORD_EMAIL, Role::Landlord)
            .await?;
        let mut tenants = Vec::with_capacity(TENANTS);
        for i in 1..=TENANTS {
            tenants.push(
                self.create_user(
                    &format!("Tenant {i}"),
                    &format!("tenant{i}@example.com"),
                    Role::Tenant,
                )
                .await?,
            );
        }

        let mut occupied = Vec::new();
        let mut unit_count = 0;
        for (name, address, units) in PROPERTIES {
            let property = self
                .create_property(name, address, units, landlord.id)
                .await?;
            for i in 1..=UNITS_PER_PROPERTY {
                let unit_number = format!("{i}{}", char::from(b'A' + i - 1));
                let rent = 900 + i64::from(i) * 85;
                let is_occupied = i <= OCCUPIED_PER_PROPERTY;
                self.create_unit(property.id, &unit_number, rent, is_occupied)
                    .await?;
                unit_count += 1;
                if is_occupied {
                    occupied.push((property.id, unit_number));
                }
            }
        }

        let manager = Actor::landlord(landlord.id);
        let mut requests = 0;
        for (i, (tenant, (property_id, unit_number))) in
            tenants.iter().zip(occupied).enumerate()
        {
            let issue = ISSUES[i % ISSUES.len()];
            let request = self
                .submit_request(
                    &Actor::tenant(tenant.id),
                    &NewMaintenanceRequest {
                        property_id,
                        unit_number,
                        issue: issue.to_string(),
                        description: format!(
                            "Issue with {} that needs to be fixed.",
                            issue.to_lowercase()
                        ),
                        priority: PRIORITIES[i % PRIORITIES.len()],
                        tenant_id: None,
                    },
                )
                .await?;

            let steps: &[MaintenanceStatus] = match i % 4 {
                1 => &[MaintenanceStatus::InProgress],
                2 => &[MaintenanceStatus::Scheduled],
                3 => &[MaintenanceStatus::InProgress, MaintenanceStatus::Completed],
                _ => &[],
            };
            for &target in steps {
                let fields = if target == MaintenanceStatus::Scheduled {
                    TransitionFields::default().scheduled_for(now() + Duration::days(7))
                } else {
                    TransitionFields::default()
                };
                self.transition_request(&manager, request.id, target, &fields)
                    .await?;
            }
            requests += 1;
        }

        let summary = SeedSummary {
            landlord_id: landlord.id,
            tenants: tenants.len(),
            properties: PROPERTIES.len(),
            units: unit_count,
            requests,
        };
        tracing::info!(?summary, "demo data seeded");
        Ok(Some(summary))
    }
}
