//! Shared HTTP adapter state.
//!
//! Built once by the bootstrap sequence from the connected persistence layer
//! and handed to every worker through `web::Data`.

use std::sync::Arc;

use crate::domain::ports::FaqRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// FAQ persistence shared by every request.
    pub faqs: Arc<dyn FaqRepository>,
}

impl HttpState {
    /// Wrap the connected repository.
    pub fn new(faqs: Arc<dyn FaqRepository>) -> Self {
        Self { faqs }
    }
}
