use std::time::Duration;
use thiserror::Error;

use crate::{CACHE_READ_TIMEOUT, REMOTE_FETCH_TIMEOUT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Validation(String),
}

#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Deadline for the local read before falling through to the remote source.
    pub cache_read_timeout: Duration,
    /// Deadline for the remote call; elapsing counts as a remote timeout.
    pub remote_timeout: Duration,
    /// Emit `Empty` instead of `Loaded([])` when the remote list has no items.
    pub report_empty: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            cache_read_timeout: CACHE_READ_TIMEOUT,
            remote_timeout: REMOTE_FETCH_TIMEOUT,
            report_empty: false,
        }
    }
}

impl CoordinatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_read_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "cache_read_timeout must be > 0".into(),
            ));
        }
        if self.remote_timeout.is_zero() {
            return Err(ConfigError::Validation("remote_timeout must be > 0".into()));
        }
        Ok(())
    }
}
