use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Identity of the caller, as issued by the identity provider.
///
/// Contains only data fields. No authentication happens here; the server
/// reads it from request headers and passes it down unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    #[must_use]
    pub const fn tenant(user_id: i64) -> Self {
        Self::new(user_id, Role::Tenant)
    }

    #[must_use]
    pub const fn landlord(user_id: i64) -> Self {
        Self::new(user_id, Role::Landlord)
    }

    /// Whether this actor manages a property owned by `owner_id`.
    #[must_use]
    pub const fn manages(&self, owner_id: i64) -> bool {
        self.role.can_manage() && self.user_id == owner_id
    }
}
