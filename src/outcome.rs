//! Classification of register faults into user-facing messages.

use std::fmt;

use crate::client::FetchError;

/// The closed set of messages a failed lookup can produce.
///
/// Always derived from an actual [`FetchError`] via [`ErrorOutcome::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// HTTP 404.
    NotFound,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 429.
    RateLimited,
    /// Any other HTTP status.
    Status(u16),
    /// No response within the client timeout.
    TimedOut,
    /// Anything else, reported with its kind and message.
    Unclassified {
        /// Fault kind name.
        kind: String,
        /// Fault message.
        message: String,
    },
}

impl ErrorOutcome {
    /// Map a fault to exactly one outcome.
    ///
    /// Status codes are checked first, then timeouts, then the catch-all.
    pub fn classify(err: &FetchError) -> Self {
        if let Some(status) = err.status() {
            return match status {
                404 => ErrorOutcome::NotFound,
                401 => ErrorOutcome::Unauthorized,
                403 => ErrorOutcome::Forbidden,
                429 => ErrorOutcome::RateLimited,
                other => ErrorOutcome::Status(other),
            };
        }

        if err.is_timeout() {
            return ErrorOutcome::TimedOut;
        }

        ErrorOutcome::Unclassified {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<&FetchError> for ErrorOutcome {
    fn from(err: &FetchError) -> Self {
        Self::classify(err)
    }
}

impl fmt::Display for ErrorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorOutcome::NotFound => {
                f.write_str("Entity not found. Verify the identifier is correct.")
            }
            ErrorOutcome::Unauthorized => {
                f.write_str("Unauthorised. Check the API key configuration.")
            }
            ErrorOutcome::Forbidden => {
                f.write_str("Forbidden. The credential may lack access to this resource.")
            }
            ErrorOutcome::RateLimited => f.write_str("Rate limit exceeded. Wait before retrying."),
            ErrorOutcome::Status(status) => write!(f, "API returned status {}.", status),
            ErrorOutcome::TimedOut => f.write_str("Request timed out. Try again."),
            ErrorOutcome::Unclassified { kind, message } => write!(f, "{}: {}", kind, message),
        }
    }
}
