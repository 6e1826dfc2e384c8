use crate::model::submission::Submission;
use crate::model::SubmissionState;
use crate::validator::MAX_SIZE_BYTES;
use slog::{debug, Logger};
use winit::window::Window;

pub const APP_TITLE: &str = "cv.pdf uploader";

/// Shown in order while the animation runs.
pub const CAPTIONS: [&str; 10] = [
    "Uploading resume...",
    "Parsing PDF...",
    "Searching for keywords...",
    "Analyzing work experience...",
    "Assessing skills...",
    "Comparing with the ideal candidate...",
    "Checking soft skills...",
    "Consulting the AI recruiter...",
    "Counting years of Excel...",
    "Final decision...",
];

pub fn caption(progress: u8) -> &'static str {
    let index = (progress as usize * CAPTIONS.len()) / 100;
    CAPTIONS[index.min(CAPTIONS.len() - 1)]
}

pub fn megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Idle {
        selected: Option<(String, u64)>,
        error: Option<String>,
    },
    InProgress {
        progress: u8,
    },
    Resolved {
        accepted: bool,
        message: String,
    },
}

impl View {
    pub fn of(submission: &Submission) -> Self {
        let state = submission.state();
        match state {
            SubmissionState::Idle => View::Idle {
                selected: submission
                    .candidate()
                    .map(|c| (c.name().to_string(), c.size())),
                error: submission.error().map(|e| e.to_string()),
            },
            SubmissionState::Uploading | SubmissionState::Animating => View::InProgress {
                progress: submission.progress(),
            },
            SubmissionState::ResolvedSuccess | SubmissionState::ResolvedFailure => {
                View::Resolved {
                    accepted: state == SubmissionState::ResolvedSuccess,
                    message: submission.message().unwrap_or_default().to_string(),
                }
            }
        }
    }

    pub fn line(&self) -> String {
        match self {
            View::Idle {
                error: Some(error), ..
            } => format!("Error: {} Press O to choose another file.", error),
            View::Idle {
                selected: Some((name, size)),
                ..
            } => format!("{} ({}) selected. Press Enter to submit.", name, megabytes(*size)),
            View::Idle { .. } => format!(
                "Press O or drop a file to choose cv.pdf (up to {}).",
                megabytes(MAX_SIZE_BYTES)
            ),
            View::InProgress { progress } => format!("{} {}%", caption(*progress), progress),
            View::Resolved { accepted, message } => {
                let verdict = if *accepted { "Decision" } else { "Error" };
                format!("{}: {} Press R to try again.", verdict, message)
            }
        }
    }

    /// Console only gets a new line when the caption or the screen changes.
    fn console_key(&self) -> String {
        match self {
            View::InProgress { progress } => caption(*progress).to_string(),
            other => other.line(),
        }
    }
}

/// Renders views into the window title and the console.
pub struct Presenter {
    window: Window,
    last: Option<View>,
    last_console: Option<String>,
    logger: Logger,
}

impl Presenter {
    pub fn new(window: Window, logger: Logger) -> Self {
        Self {
            window,
            last: None,
            last_console: None,
            logger,
        }
    }

    pub fn present(&mut self, view: View) {
        if self.last.as_ref() == Some(&view) {
            return;
        }
        let line = view.line();
        self.window
            .set_title(format!("{} | {}", APP_TITLE, line).as_str());

        let console_key = view.console_key();
        if self.last_console.as_ref() != Some(&console_key) {
            debug!(self.logger, "Presenting: {}", line);
            println!("{}", line);
            self.last_console = Some(console_key);
        }
        self.last = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clock::ClockProfile;
    use crate::model::Outcome;
    use crate::validator::Selection;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::{Duration, Instant};

    #[test]
    fn caption_index_follows_progress() {
        assert_eq!(caption(0), CAPTIONS[0]);
        assert_eq!(caption(9), CAPTIONS[0]);
        assert_eq!(caption(10), CAPTIONS[1]);
        assert_eq!(caption(55), CAPTIONS[5]);
        assert_eq!(caption(99), CAPTIONS[9]);
        assert_eq!(caption(100), CAPTIONS[9]);
    }

    #[test]
    fn megabytes_has_two_decimals() {
        assert_eq!(megabytes(2 * 1024 * 1024), "2.00 MB");
        assert_eq!(megabytes(1536 * 1024), "1.50 MB");
    }

    #[test]
    fn view_tracks_submission_lifecycle() {
        let logger = Logger::root(slog::Discard, slog::o!());
        let mut submission = Submission::new(ClockProfile::Linear, logger);
        assert_eq!(
            View::of(&submission),
            View::Idle {
                selected: None,
                error: None
            }
        );

        submission
            .select(Some(Selection::from_bytes("resume.pdf", vec![1])))
            .unwrap();
        let view = View::of(&submission);
        assert!(view.line().contains("exactly \"cv.pdf\""));

        submission
            .select(Some(Selection::from_bytes("cv.pdf", vec![1, 2, 3])))
            .unwrap();
        assert_eq!(
            View::of(&submission),
            View::Idle {
                selected: Some(("cv.pdf".to_string(), 3)),
                error: None
            }
        );

        let now = Instant::now();
        let ticket = submission.submit(now, &mut StdRng::seed_from_u64(9)).unwrap();
        submission.tick(now + Duration::from_millis(2000));
        let view = View::of(&submission);
        assert_eq!(view, View::InProgress { progress: 50 });
        assert_eq!(view.line(), format!("{} 50%", CAPTIONS[5]));

        submission.complete(ticket.epoch, Outcome::accepted(Some("Overqualified.".into())));
        submission.tick(now + Duration::from_millis(4000));
        assert_eq!(
            View::of(&submission),
            View::Resolved {
                accepted: true,
                message: "Overqualified.".to_string()
            }
        );
    }
}
