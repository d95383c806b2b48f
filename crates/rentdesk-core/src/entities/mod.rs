//! Entity structs for rentdesk domain objects.
//!
//! Each entity maps to a table in the libSQL store (`rentdesk-db` migrations).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` and use
//! camelCase field names on the wire.

mod audit;
mod maintenance;
mod property;
mod user;

pub use audit::AuditEntry;
pub use maintenance::{MaintenanceListing, MaintenanceRequest};
pub use property::{Property, Unit};
pub use user::User;
