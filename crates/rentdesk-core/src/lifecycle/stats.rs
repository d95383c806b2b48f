use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MaintenanceStatus;

/// Per-status request counts for a landlord's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MaintenanceStats {
    pub total: u64,
    pub urgent: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub scheduled: u64,
    pub completed: u64,
}

impl MaintenanceStats {
    /// Add `count` requests in `status`, keeping `total` in step.
    pub fn record(&mut self, status: MaintenanceStatus, count: u64) {
        let slot = match status {
            MaintenanceStatus::Pending => &mut self.pending,
            MaintenanceStatus::InProgress => &mut self.in_progress,
            MaintenanceStatus::Scheduled => &mut self.scheduled,
            MaintenanceStatus::Completed => &mut self.completed,
            MaintenanceStatus::Urgent => &mut self.urgent,
        };
        *slot += count;
        self.total += count;
    }

    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = MaintenanceStatus>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.record(status, 1);
        }
        stats
    }

    #[must_use]
    pub const fn count(&self, status: MaintenanceStatus) -> u64 {
        match status {
            MaintenanceStatus::Pending => self.pending,
            MaintenanceStatus::InProgress => self.in_progress,
            MaintenanceStatus::Scheduled => self.scheduled,
            MaintenanceStatus::Completed => self.completed,
            MaintenanceStatus::Urgent => self.urgent,
        }
    }
}
