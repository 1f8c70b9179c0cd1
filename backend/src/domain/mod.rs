//! Domain primitives and ports.
//!
//! Purpose: keep the error taxonomy and the FAQ model free of transport
//! concerns. Inbound adapters map these types onto HTTP; outbound adapters
//! implement the ports.
//!
//! Public surface:
//! - DomainError: expected failure carrying status, message, category and
//!   details.
//! - Faq, FaqDraft, FaqPatch: the FAQ read model and validated write models.

pub mod error;
pub mod faq;
pub mod ports;

pub use self::error::{DomainError, DomainErrorValidationError, Origin};
pub use self::faq::{Faq, FaqDraft, FaqPatch};
