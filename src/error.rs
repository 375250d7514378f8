//! Error types for the M-Pesa client
//!
//! Every failure is surfaced to the caller of the triggering method. Nothing
//! here is retried or recovered locally.

use thiserror::Error;

/// Client-level errors
#[derive(Debug, Error)]
pub enum MpesaError {
    /// Missing or invalid credentials/configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The gateway answered with a non-2xx status
    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        status: u16,
        endpoint: String,
        body: String,
    },

    /// The body was readable but did not have the expected shape
    #[error("Unexpected response from {endpoint}: {message}")]
    ResponseFormat { endpoint: String, message: String },

    /// Transport failure or an unparsable response body
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: RequestFailure,
    },
}

/// Underlying cause of a [`MpesaError::Request`]
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON body: {0}")]
    Body(#[from] serde_json::Error),
}

impl MpesaError {
    pub(crate) fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        MpesaError::Request {
            endpoint: endpoint.to_string(),
            source: RequestFailure::Transport(source),
        }
    }

    pub(crate) fn body(endpoint: &str, source: serde_json::Error) -> Self {
        MpesaError::Request {
            endpoint: endpoint.to_string(),
            source: RequestFailure::Body(source),
        }
    }

    /// HTTP status code, when the gateway produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MpesaError::HttpStatus { status, .. } => Some(*status),
            MpesaError::Request {
                source: RequestFailure::Transport(e),
                ..
            } => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Endpoint the failing call targeted
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            MpesaError::Configuration(_) => None,
            MpesaError::HttpStatus { endpoint, .. }
            | MpesaError::ResponseFormat { endpoint, .. }
            | MpesaError::Request { endpoint, .. } => Some(endpoint.as_str()),
        }
    }
}

/// Result type alias for convenience
pub type MpesaResult<T> = Result<T, MpesaError>;
