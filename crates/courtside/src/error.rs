use courtside_core::error::{ErrorClass, InternalError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///
/// The message is a fixed text per kind. Source detail, predicates, and
/// cursor contents stay in the logs and never reach the caller.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = ErrorKind::from(err.class);
        tracing::error!(
            kind = %kind,
            detail = %err.display_with_class(),
            "page request failed"
        );

        Self::new(kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and API surfaces.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The data source did not answer within the deadline.
    Timeout,

    /// The data source is not serving reads.
    Unavailable,

    /// The request was cancelled before it completed.
    Cancelled,

    /// The caller cannot remediate this.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Timeout => "the request timed out",
            Self::Unavailable => "the service is temporarily unavailable",
            Self::Cancelled => "the request was cancelled",
            Self::Internal => "an internal error occurred",
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout | Self::Unavailable)
    }
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Timeout => Self::Timeout,
            ErrorClass::Unavailable => Self::Unavailable,
            ErrorClass::Cancelled => Self::Cancelled,
            ErrorClass::InvariantViolation | ErrorClass::Internal => Self::Internal,
        }
    }
}

///
/// TESTS
///
