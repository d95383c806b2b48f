//! Repository modules implementing storage operations for rentdesk entities.
//!
//! Each module adds methods to `RentService` via `impl RentService` blocks.

pub mod audit;
pub mod maintenance;
pub mod property;
pub mod user;
