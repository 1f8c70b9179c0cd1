//! Port for establishing the persistence layer at startup.

use std::sync::Arc;

use async_trait::async_trait;

use super::{FaqRepository, FixtureFaqRepository};

/// The persistence layer could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("persistence connection failed: {message}")]
pub struct PersistenceConnectionError {
    message: String,
}

impl PersistenceConnectionError {
    /// Create a connection error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Establishes the persistence layer once, before the listener is bound.
///
/// The returned repository is shared by every request for the lifetime of
/// the process.
#[async_trait]
pub trait PersistenceConnector: Send + Sync {
    /// Connect and return the repository handle used by request handlers.
    async fn connect(&self) -> Result<Arc<dyn FaqRepository>, PersistenceConnectionError>;
}

/// Connector that always succeeds with an in-memory repository.
#[derive(Debug, Default, Clone)]
pub struct FixturePersistenceConnector {
    repository: FixtureFaqRepository,
}

impl FixturePersistenceConnector {
    /// Create a connector handing out the given repository.
    pub fn new(repository: FixtureFaqRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PersistenceConnector for FixturePersistenceConnector {
    async fn connect(&self) -> Result<Arc<dyn FaqRepository>, PersistenceConnectionError> {
        Ok(Arc::new(self.repository.clone()))
    }
}
