//! Faults raised while fetching an entity from the register.

use thiserror::Error;

/// Errors that can occur during a register request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The register answered with a non-2xx status.
    #[error("register returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// No complete response arrived within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection to the register could not be established.
    #[error("{0}")]
    Connect(String),

    /// A 2xx response whose body was not valid JSON.
    #[error("{0}")]
    Decode(String),

    /// Any other transport failure.
    #[error("{0}")]
    Request(String),

    /// The client could not be built from the supplied configuration.
    #[error("{0}")]
    Configuration(String),
}

impl FetchError {
    /// Stable name of the fault category.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "HttpStatusError",
            FetchError::Timeout => "TimeoutError",
            FetchError::Connect(_) => "ConnectError",
            FetchError::Decode(_) => "DecodeError",
            FetchError::Request(_) => "RequestError",
            FetchError::Configuration(_) => "ConfigurationError",
        }
    }

    /// HTTP status carried by the fault, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the fault is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if err.is_builder() {
            FetchError::Configuration(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Result type for register requests.
pub type FetchResult<T> = Result<T, FetchError>;
