//! # rentdesk-core
//!
//! Core types, lifecycle rules, and error types for rentdesk.
//!
//! This crate provides the foundational types shared across all rentdesk crates:
//! - Entity structs for maintenance requests, properties, units, users, audit
//! - Status, priority, and role enums (the status enum carries the transition table)
//! - The acting identity passed in from the identity provider
//! - Cross-cutting error types
//! - Pure lifecycle functions: submission checks, transition planning,
//!   visibility/search/sort, and status aggregation
//! - Timestamp parsing shared by the store and the HTTP layer

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod lifecycle;
pub mod timestamps;
