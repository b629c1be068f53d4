//! Error types for the owner-API client.

use thiserror::Error;

/// Errors that can occur talking to the owner API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Access token not provided.
    #[error("owner-API token not set. Set VALET_API_TOKEN environment variable.")]
    NoToken,

    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API.
    #[error("owner API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The vehicle is asleep and did not accept the request (HTTP 408).
    #[error("vehicle is asleep and unavailable")]
    VehicleAsleep,

    /// The vehicle did not come online within the wake timeout.
    #[error("vehicle did not wake up within {0} seconds")]
    WakeTimeout(u64),

    /// The API accepted the request but the vehicle rejected the command.
    #[error("command rejected by vehicle: {reason}")]
    CommandRejected {
        /// Rejection reason reported by the vehicle.
        reason: String,
    },

    /// Response body could not be parsed.
    #[error("failed to parse response: {0}")]
    ResponseParse(#[from] serde_json::Error),
}

/// Result type for owner-API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
