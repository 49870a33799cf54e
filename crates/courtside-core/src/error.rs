use crate::source::SourceError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Messages may carry source detail; the public facade maps errors to a
/// generic kind before anything crosses the external boundary.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a source-origin timeout.
    pub(crate) fn source_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Timeout, ErrorOrigin::Source, message)
    }

    /// Construct a source-origin cancellation.
    pub(crate) fn source_cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Cancelled, ErrorOrigin::Source, message)
    }

    /// Construct a source-origin unavailability error.
    pub(crate) fn source_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unavailable, ErrorOrigin::Source, message)
    }

    /// Construct a paginator-origin invariant violation.
    pub(crate) fn paginator_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Paginator,
            message,
        )
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self.class, ErrorClass::Timeout)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<SourceError> for InternalError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Timeout => Self::source_timeout(err.to_string()),
            SourceError::Cancelled => Self::source_cancelled(err.to_string()),
            SourceError::Unavailable(_) | SourceError::Backend(_) => {
                Self::source_unavailable(err.to_string())
            }
        }
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    Timeout,
    Unavailable,
    Cancelled,
    InvariantViolation,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Unavailable => "unavailable",
            Self::Cancelled => "cancelled",
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorOrigin {
    Source,
    Paginator,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Source => "source",
            Self::Paginator => "paginator",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{ErrorClass, ErrorOrigin, InternalError};
    use crate::source::SourceError;

    #[test]
    fn source_errors_map_to_stable_classes() {
        let timeout = InternalError::from(SourceError::Timeout);
        assert_eq!(timeout.class, ErrorClass::Timeout);
        assert_eq!(timeout.origin, ErrorOrigin::Source);
        assert!(timeout.is_timeout());

        let cancelled = InternalError::from(SourceError::Cancelled);
        assert_eq!(cancelled.class, ErrorClass::Cancelled);

        let down = InternalError::from(SourceError::Unavailable("replica offline".to_string()));
        assert_eq!(down.class, ErrorClass::Unavailable);

        let backend = InternalError::from(SourceError::backend(std::io::Error::other("disk")));
        assert_eq!(backend.class, ErrorClass::Unavailable);
    }

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = InternalError::paginator_invariant("page overflow");

        assert_eq!(
            err.display_with_class(),
            "paginator:invariant_violation: page overflow"
        );
    }

    #[test]
    fn every_class_and_origin_has_a_stable_label() {
        let classes = [
            ErrorClass::Timeout,
            ErrorClass::Unavailable,
            ErrorClass::Cancelled,
            ErrorClass::InvariantViolation,
            ErrorClass::Internal,
        ]
        .map(|class| class.to_string());
        let origins =
            [ErrorOrigin::Source, ErrorOrigin::Paginator].map(|origin| origin.to_string());

        assert_eq!(
            classes,
            ["timeout", "unavailable", "cancelled", "invariant_violation", "internal"]
        );
        assert_eq!(origins, ["source", "paginator"]);
    }
}
