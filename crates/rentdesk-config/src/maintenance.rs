//! Limits applied to new maintenance requests.

use rentdesk_core::lifecycle::SubmissionRules;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Upper bound on the description minimum.
const DESCRIPTION_CAP: usize = 10_000;

const fn default_min_description_len() -> usize {
    10
}

const fn default_max_issue_len() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    /// Minimum description length after trimming.
    #[serde(default = "default_min_description_len")]
    pub min_description_len: usize,

    /// Maximum issue title length after trimming.
    #[serde(default = "default_max_issue_len")]
    pub max_issue_len: usize,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            min_description_len: default_min_description_len(),
            max_issue_len: default_max_issue_len(),
        }
    }
}

impl MaintenanceConfig {
    pub const fn rules(&self) -> SubmissionRules {
        SubmissionRules {
            min_description_len: self.min_description_len,
            max_issue_len: self.max_issue_len,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.min_description_len == 0 {
            return Err(ConfigError::invalid(
                "maintenance.min_description_len",
                "must be at least 1",
            ));
        }
        if self.min_description_len >= DESCRIPTION_CAP {
            return Err(ConfigError::invalid(
                "maintenance.min_description_len",
                format!("must be below {DESCRIPTION_CAP}"),
            ));
        }
        if self.max_issue_len == 0 {
            return Err(ConfigError::invalid(
                "maintenance.max_issue_len",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_submission_rules() {
        assert_eq!(MaintenanceConfig::default().rules(), SubmissionRules::default());
    }

    #[test]
    fn zero_lengths_rejected() {
        let zero_min = MaintenanceConfig {
            min_description_len: 0,
            ..Default::default()
        };
        let zero_max = MaintenanceConfig {
            max_issue_len: 0,
            ..Default::default()
        };
        assert!(zero_min.validate().is_err());
        assert!(zero_max.validate().is_err());
    }

    #[test]
    fn minimum_must_stay_below_cap() {
        let config = MaintenanceConfig {
            min_description_len: DESCRIPTION_CAP,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = MaintenanceConfig {
            min_description_len: DESCRIPTION_CAP - 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
