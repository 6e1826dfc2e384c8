pub mod clock;
pub mod error;
pub mod gate;
pub mod manager;
pub mod submission;

use std::fmt;

pub const DEFAULT_DECISION: &str = "Resume rejected for an unknown reason.";
pub const DEFAULT_FAILURE: &str = "File upload failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Uploading,
    /// The network leg is done, only the animation is left.
    Animating,
    ResolvedSuccess,
    ResolvedFailure,
}

impl SubmissionState {
    pub fn is_in_progress(self) -> bool {
        matches!(self, SubmissionState::Uploading | SubmissionState::Animating)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Uploading => "uploading",
            SubmissionState::Animating => "animating",
            SubmissionState::ResolvedSuccess => "resolved-success",
            SubmissionState::ResolvedFailure => "resolved-failure",
        };
        f.write_str(name)
    }
}

/// Submission cycle stamp. Completions carrying an old epoch are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of one exchange with the evaluation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    accepted: bool,
    detail: Option<String>,
}

impl Outcome {
    pub fn accepted(detail: Option<String>) -> Self {
        Self {
            accepted: true,
            detail,
        }
    }

    pub fn rejected(detail: Option<String>) -> Self {
        Self {
            accepted: false,
            detail,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Text shown to the user once disclosed.
    pub fn message(&self) -> &str {
        match (self.accepted, self.detail()) {
            (_, Some(detail)) => detail,
            (true, None) => DEFAULT_DECISION,
            (false, None) => DEFAULT_FAILURE,
        }
    }
}
