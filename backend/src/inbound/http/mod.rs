//! HTTP inbound adapter: the request pipeline and its resource routers.

pub mod body;
pub mod cors;
pub mod envelope;
pub mod error;
pub mod faqs;
pub mod faults;
pub mod pipeline;
pub mod state;

pub use envelope::{DEFAULT_SUCCESS_MESSAGE, Envelope};
pub use error::{ApiResult, INTERNAL_ERROR_MESSAGE, ROUTE_NOT_FOUND_MESSAGE};
pub use faults::FaultBoundary;
pub use pipeline::{API_PREFIX, Mount, Pipeline};
pub use state::HttpState;
