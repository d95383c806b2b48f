//! Route handlers.

pub mod health;
pub mod maintenance;

pub use health::{health_check, not_found};
pub use maintenance::{
    add_note, create_request, get_request, list_requests, request_stats, transition_request,
};
