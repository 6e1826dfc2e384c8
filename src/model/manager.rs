use crate::model::clock::ClockProfile;
use crate::model::error::ActionError;
use crate::model::submission::{Submission, SubmitTicket};
use crate::model::{Epoch, Outcome};
use crate::transport::{self, EvaluationService, CONNECTION_FAILURE};
use crate::validator::Selection;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slog::{debug, error, trace, warn, Logger};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use winit::event_loop::EventLoopProxy;

#[derive(Debug)]
pub enum Command {
    Select(Option<Selection>),
    Submit,
    Reset,
}

/// Events posted back into the event loop from worker threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Completed { epoch: Epoch, outcome: Outcome },
}

/// Delivers worker results to the thread that owns the submission.
pub trait CompletionSink: Send + 'static {
    /// Returns `false` if the receiving side is gone.
    fn deliver(&self, event: AppEvent) -> bool;
}

impl CompletionSink for EventLoopProxy<AppEvent> {
    fn deliver(&self, event: AppEvent) -> bool {
        self.send_event(event).is_ok()
    }
}

impl CompletionSink for Sender<AppEvent> {
    fn deliver(&self, event: AppEvent) -> bool {
        self.send(event).is_ok()
    }
}

/// Owns the submission and dispatches commands, completions and clock ticks
/// to it. Every mutation happens on the caller's thread; only the network
/// exchange runs elsewhere.
pub struct SubmissionManager<S, K> {
    submission: Submission,
    service: Arc<S>,
    sink: K,
    rng: StdRng,
    logger: Logger,
}

impl<S, K> SubmissionManager<S, K>
where
    S: EvaluationService + 'static,
    K: CompletionSink + Clone,
{
    pub fn new(profile: ClockProfile, service: Arc<S>, sink: K, logger: Logger) -> Self {
        Self::with_rng(profile, service, sink, StdRng::from_entropy(), logger)
    }

    pub fn with_rng(
        profile: ClockProfile,
        service: Arc<S>,
        sink: K,
        rng: StdRng,
        logger: Logger,
    ) -> Self {
        trace!(logger, "Creating submission manager");
        Self {
            submission: Submission::new(profile, logger.new(slog::o!("part" => "submission"))),
            service,
            sink,
            rng,
            logger,
        }
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn is_busy(&self) -> bool {
        self.submission.state().is_in_progress()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.submission.next_deadline()
    }

    pub fn handle_command(&mut self, command: Command, now: Instant) -> Result<(), ActionError> {
        trace!(self.logger, "Got command: {:?}", command);
        let result = match command {
            Command::Select(selection) => self.submission.select(selection),
            Command::Reset => self.submission.reset(),
            Command::Submit => self
                .submission
                .submit(now, &mut self.rng)
                .map(|ticket| self.spawn_exchange(ticket)),
        };
        if let Err(e) = &result {
            warn!(self.logger, "Command rejected: {}", e);
        }
        result
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        trace!(
            self.logger,
            "Got event: {:?} (current submission {})",
            event,
            self.submission.epoch()
        );
        match event {
            AppEvent::Completed { epoch, outcome } => {
                self.submission.complete(epoch, outcome);
            }
        }
    }

    /// Advances the animation if its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.next_deadline() {
            if now >= deadline {
                self.submission.tick(now);
            }
        }
    }

    fn spawn_exchange(&mut self, ticket: SubmitTicket) {
        let SubmitTicket { epoch, candidate } = ticket;
        let service = self.service.clone();
        let sink = self.sink.clone();
        let logger = self.logger.clone();

        debug!(self.logger, "Spawning upload worker for submission {}", epoch);
        let spawned = thread::Builder::new()
            .name(format!("upload-{}", epoch))
            .spawn(move || {
                let result = service.upload(&candidate);
                if let Err(e) = &result {
                    warn!(logger, "Upload of submission {} failed: {}", epoch, e);
                }
                let outcome = transport::fold(result);
                if !sink.deliver(AppEvent::Completed { epoch, outcome }) {
                    warn!(logger, "Can't deliver outcome of submission {}", epoch);
                }
            });

        if let Err(e) = spawned {
            error!(self.logger, "Can't spawn upload worker: {}", e);
            self.submission.complete(
                epoch,
                Outcome::rejected(Some(CONNECTION_FAILURE.to_string())),
            );
        }
    }
}
