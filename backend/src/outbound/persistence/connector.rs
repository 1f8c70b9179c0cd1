//! Diesel-backed persistence connector used by the bootstrap sequence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{FaqRepository, PersistenceConnectionError, PersistenceConnector};

use super::diesel_faq_repository::DieselFaqRepository;
use super::pool::{DbPool, PoolConfig};

/// Connects to PostgreSQL once and hands out a pooled FAQ repository.
#[derive(Debug, Clone)]
pub struct DieselPersistenceConnector {
    config: PoolConfig,
}

impl DieselPersistenceConnector {
    /// Create a connector for the given pool configuration.
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PersistenceConnector for DieselPersistenceConnector {
    async fn connect(&self) -> Result<Arc<dyn FaqRepository>, PersistenceConnectionError> {
        debug!(max_size = self.config.max_size(), "connecting to database");
        let pool = DbPool::connect(self.config.clone())
            .await
            .map_err(|err| PersistenceConnectionError::new(err.to_string()))?;
        Ok(Arc::new(DieselFaqRepository::new(pool)))
    }
}
