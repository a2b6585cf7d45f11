//! Session lifetime configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Session lifetime configuration
///
/// Sessions live for the life of the process unless `idle_ttl_secs` is set,
/// in which case a background sweep evicts sessions idle for longer.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    /// Idle time after which a session is evicted (disabled when unset)
    pub idle_ttl_secs: Option<u64>,

    /// How often the idle sweep runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl SessionsConfig {
    pub fn idle_ttl(&self) -> Option<Duration> {
        self.idle_ttl_secs.map(Duration::from_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        if self.idle_ttl_secs == Some(0) {
            return Err(ValidationError::InvalidIdleTtl);
        }
        Ok(())
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: None,
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    60
}
