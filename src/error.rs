mod error_kind;

use std::fmt::{Debug, Display, Formatter};

pub use error_kind::ErrorKind;

/// Error every ceremony operation resolves with when it doesn't succeed.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
}

impl Error {
    /// Creates a Network error instance with the given root cause.
    pub fn network(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Network,
        }
    }

    /// Creates a Ceremony error instance with the given root cause.
    pub fn ceremony(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Ceremony,
        }
    }

    /// Creates an Indeterminate error instance with the given network failure as a root cause.
    pub fn indeterminate(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Indeterminate,
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Indicates whether the error was caused by the relying party being unreachable or
    /// responding with a failure, regardless of the ceremony step.
    pub fn is_network(&self) -> bool {
        matches!(self.kind, ErrorKind::Network | ErrorKind::Indeterminate)
    }

    /// Returns the underlying cause of the error.
    pub fn root_cause(&self) -> &anyhow::Error {
        &self.root_cause
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap_or_else(|root_cause| Error {
            root_cause,
            kind: ErrorKind::Unknown,
        })
    }
}
