use std::error::Error;
use std::fmt;

use crate::transport::TransportError;

/// Local, pre-request failure. Never reaches the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was missing or blank.
    Required {
        field: &'static str,
        message: &'static str,
    },
    /// Bulk mode was selected without choosing a file.
    MissingFile,
    /// The chosen TSV file has no content.
    EmptyFile,
    /// The first row of the TSV file does not match the header contract.
    TsvHeader {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { message, .. } => f.write_str(message),
            ValidationError::MissingFile => f.write_str("Please choose a TSV file."),
            ValidationError::EmptyFile => f.write_str("The TSV file is empty."),
            ValidationError::TsvHeader { expected, found } => write!(
                f,
                "TSV header mismatch: expected [{}], found [{}]",
                expected.join(", "),
                found.join(", ")
            ),
        }
    }
}

impl Error for ValidationError {}

/// Failure of a user-triggered action (create, delete).
///
/// By the time an `ActionError` is returned it has already been shown on the
/// screen's notifier; callers only need it to drive inline state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    Validation(ValidationError),
    Transport(TransportError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Validation(e) => write!(f, "{}", e),
            ActionError::Transport(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ActionError::Validation(e) => Some(e),
            ActionError::Transport(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        ActionError::Validation(err)
    }
}

impl From<TransportError> for ActionError {
    fn from(err: TransportError) -> Self {
        ActionError::Transport(err)
    }
}
