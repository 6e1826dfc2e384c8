use std::error::Error;
use std::fmt;

/// A command issued in a state that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    SubmissionInProgress,
    NothingToSubmit,
    NothingToReset,
}

impl Error for ActionError {}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::SubmissionInProgress => write!(f, "A submission is already in progress"),
            ActionError::NothingToSubmit => write!(f, "No valid file selected"),
            ActionError::NothingToReset => write!(f, "Nothing to reset"),
        }
    }
}
