//! Error types for suggestion, select and analyze fetches.
//!
//! Every variant names the data source it came from so a failed aggregate
//! fetch can be reported without losing which side broke.

use crate::network::TransportError;

/// Errors raised while fetching or parsing data from a source.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// The request never produced a response.
    #[error("{origin} request failed: {message}")]
    Request { origin: String, message: String },

    /// The source answered with a non-2xx status.
    #[error("{origin} returned HTTP {status}")]
    Status { origin: String, status: u16 },

    /// The request exceeded its timeout.
    #[error("{origin} request timed out")]
    Timeout { origin: String },

    /// The caller aborted the request.
    #[error("{origin} request aborted")]
    Aborted { origin: String },

    /// The response body did not have the expected shape.
    #[error("{origin} response could not be parsed: {message}")]
    Parse { origin: String, message: String },

    /// An endpoint could not be built from configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SuggestError {
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        SuggestError::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn status(origin: impl Into<String>, status: u16) -> Self {
        SuggestError::Status {
            origin: origin.into(),
            status,
        }
    }

    /// Attribute a transport failure to a source
    pub fn transport(origin: impl Into<String>, err: TransportError) -> Self {
        let origin = origin.into();
        match err {
            TransportError::Timeout => SuggestError::Timeout { origin },
            TransportError::Aborted => SuggestError::Aborted { origin },
            TransportError::Request(e) => SuggestError::Request {
                origin,
                message: e.to_string(),
            },
        }
    }

    /// Name of the source that failed, if any
    pub fn origin(&self) -> Option<&str> {
        match self {
            SuggestError::Request { origin, .. }
            | SuggestError::Status { origin, .. }
            | SuggestError::Timeout { origin }
            | SuggestError::Aborted { origin }
            | SuggestError::Parse { origin, .. } => Some(origin),
            SuggestError::Config(_) => None,
        }
    }

    /// Network or HTTP level failure
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            SuggestError::Request { .. }
                | SuggestError::Status { .. }
                | SuggestError::Timeout { .. }
                | SuggestError::Aborted { .. }
        )
    }

    /// Unexpected payload shape
    pub fn is_parse_error(&self) -> bool {
        matches!(self, SuggestError::Parse { .. })
    }
}

impl From<url::ParseError> for SuggestError {
    fn from(err: url::ParseError) -> Self {
        SuggestError::Config(err.to_string())
    }
}

/// Convenience type alias for mmw-client results.
pub type Result<T> = std::result::Result<T, SuggestError>;
