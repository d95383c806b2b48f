//! # rentdesk-server
//!
//! HTTP+JSON surface for maintenance requests: routing, actor extraction
//! from headers, error rendering, and the `rentdesk` command line.

pub mod app;
pub mod cli;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod state;

pub use app::create_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
