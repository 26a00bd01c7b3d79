//! API response types.

use serde::Serialize;

/// Result of appending a load to the session.
#[derive(Debug, Serialize)]
pub struct AppendResponse {
    /// `false` when the entry was dropped for non-positive power or hours.
    pub accepted: bool,
    /// Number of loads in the session after the request.
    pub count: usize,
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
