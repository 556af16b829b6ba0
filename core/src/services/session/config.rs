//! Configuration for the session manager

use std::time::Duration;

use crate::services::password::DEFAULT_COST;

/// Configuration for the session manager
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Upper bound for any single call into the user directory or token store
    pub store_timeout: Duration,
    /// bcrypt cost for passwords hashed through the manager
    pub password_cost: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            password_cost: DEFAULT_COST,
        }
    }
}

impl SessionConfig {
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}
