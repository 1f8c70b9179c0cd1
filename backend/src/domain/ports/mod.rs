//! Domain ports defining the edges of the hexagon.
//!
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants.

mod faq_repository;
mod persistence;

#[cfg(test)]
pub use faq_repository::MockFaqRepository;
pub use faq_repository::{FaqRepository, FaqRepositoryError, FixtureFaqRepository};
pub use persistence::{
    FixturePersistenceConnector, PersistenceConnectionError, PersistenceConnector,
};
