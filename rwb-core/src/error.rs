/// Error types for the dashboard backend client
use thiserror::Error;

/// Failure of a single backend fetch.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[cfg(feature = "api")]
    #[error("request to {endpoint} failed: {source}")]
    HttpRequest {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// Response body was not the JSON we expected
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A field the view cannot render without was absent
    #[error("{endpoint} response is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },
}

impl ApiError {
    /// The endpoint path the failing request targeted.
    pub fn endpoint(&self) -> &'static str {
        match self {
            #[cfg(feature = "api")]
            ApiError::HttpRequest { endpoint, .. } => endpoint,
            ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. }
            | ApiError::MissingField { endpoint, .. } => endpoint,
        }
    }
}

/// Dashboard configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid dashboard config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dashboard config: {0}")]
    Invalid(String),
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
