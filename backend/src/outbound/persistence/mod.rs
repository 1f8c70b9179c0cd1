//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Connections come from a `bb8` pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use faq_backend::outbound::persistence::{DbPool, DieselFaqRepository, PoolConfig};
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/faqs")).await?;
//! let repo = DieselFaqRepository::new(pool);
//! ```

mod connector;
mod diesel_faq_repository;
mod models;
mod pool;
mod schema;

pub use connector::DieselPersistenceConnector;
pub use diesel_faq_repository::DieselFaqRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
