use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A building or home owned by a landlord.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub address: String,
    /// Number of rentable units.
    pub units: u32,
    pub owner_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i64,
    pub property_id: i64,
    pub unit_number: String,
    /// Monthly rent in whole currency units.
    pub rent_amount: i64,
    pub is_occupied: bool,
}
