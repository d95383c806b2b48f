use std::sync::Arc;

use rentdesk_db::service::RentService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RentService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: RentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
