//! Domain-level error taxonomy.
//!
//! A [`DomainError`] describes an expected failure: invalid input, a missing
//! record, a conflict, or a rejected upstream call. Code that detects such a
//! failure returns it instead of a value. Inbound adapters render it as a
//! failure envelope carrying the error's status code and message.

use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Message used when the caller does not supply one.
pub const DEFAULT_MESSAGE: &str = "Something went wrong";

/// Category used when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "UNKNOWN";

/// Diagnostic trace describing where a [`DomainError`] was raised.
///
/// Only ever used for operator-side debugging; adapters must not serialise
/// it to clients.
#[derive(Clone)]
pub enum Origin {
    /// Captured at construction. Honours `RUST_BACKTRACE`, so the trace may
    /// be disabled.
    Captured(Arc<Backtrace>),
    /// Supplied explicitly, e.g. when translating a failure raised elsewhere.
    Supplied(String),
}

impl Origin {
    fn capture() -> Self {
        Self::Captured(Arc::new(Backtrace::capture()))
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Captured(trace) => f
                .debug_tuple("Captured")
                .field(&trace.status())
                .finish(),
            Self::Supplied(trace) => f.debug_tuple("Supplied").field(trace).finish(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Captured(trace) => write!(f, "{trace}"),
            Self::Supplied(trace) => f.write_str(trace),
        }
    }
}

/// Validation errors emitted by [`DomainError::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainErrorValidationError {
    /// The status code is not a 4xx or 5xx status.
    #[error("status code {0} is not a client or server error status")]
    StatusOutOfRange(u16),
    /// The message is empty once trimmed of whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// Expected failure raised by handlers and collaborators.
///
/// ## Invariants
/// - `status_code` is within `400..=599`, so a rendered envelope always has
///   `success == false`.
/// - `message` is non-empty once trimmed.
/// - The value is immutable once built; the `with_*` methods consume it and
///   are meant for construction only.
///
/// # Examples
/// ```
/// use faq_backend::domain::DomainError;
///
/// let err = DomainError::not_found("FAQ not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.category(), "NOT_FOUND");
/// assert!(!err.success());
/// ```
#[derive(Debug, Clone)]
pub struct DomainError {
    status_code: u16,
    message: String,
    category: String,
    errors: Vec<Value>,
    origin: Origin,
}

impl DomainError {
    /// Create an error with the given status and message.
    ///
    /// Never fails: a status outside `400..=599` collapses to 500. The message
    /// is kept as given, even when empty. Use [`Self::try_new`] to reject such
    /// input instead.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let status_code = if is_error_status(status_code) {
            status_code
        } else {
            500
        };
        Self::assemble(status_code, message)
    }

    /// Fallible constructor that validates the status and message.
    pub fn try_new(
        status_code: u16,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        if !is_error_status(status_code) {
            return Err(DomainErrorValidationError::StatusOutOfRange(status_code));
        }
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self::assemble(status_code, message))
    }

    /// Create an error carrying only a status; the message is the placeholder.
    pub fn from_status(status_code: u16) -> Self {
        Self::new(status_code, DEFAULT_MESSAGE)
    }

    fn assemble(status_code: u16, message: String) -> Self {
        Self {
            status_code,
            message,
            category: DEFAULT_CATEGORY.to_owned(),
            errors: Vec::new(),
            origin: Origin::capture(),
        }
    }

    /// Tag the error with a free-form category for client-side branching.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Attach auxiliary details, such as per-field validation failures.
    #[must_use]
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = Value>) -> Self {
        self.errors = errors.into_iter().collect();
        self
    }

    /// Replace the captured origin with an explicit trace.
    #[must_use]
    pub fn with_origin(mut self, trace: impl Into<String>) -> Self {
        self.origin = Origin::Supplied(trace.into());
        self
    }

    /// HTTP status reported to the client.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Free-form category tag.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Auxiliary details in the order they were supplied.
    pub fn errors(&self) -> &[Value] {
        &self.errors
    }

    /// Diagnostic trace of where the error was raised.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Always `false`; a domain error never describes a successful outcome.
    pub fn success(&self) -> bool {
        false
    }

    /// Whether the failure is attributed to the client (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message).with_category("BAD_REQUEST")
    }

    /// 400 Bad Request listing the failing fields.
    pub fn validation(message: impl Into<String>, errors: impl IntoIterator<Item = Value>) -> Self {
        Self::new(400, message)
            .with_category("VALIDATION")
            .with_errors(errors)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message).with_category("NOT_FOUND")
    }

    /// 409 Conflict.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, message).with_category("CONFLICT")
    }

    /// 502 Bad Gateway for a rejected upstream dependency.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(502, message).with_category("UPSTREAM")
    }
}

fn is_error_status(status_code: u16) -> bool {
    (400..=599).contains(&status_code)
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests;
