//! FAQ service library: domain types, HTTP pipeline, persistence adapters
//! and the bootstrap sequence.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
