use super::clock::{AnimationClock, ClockProfile};
use super::error::ActionError;
use super::gate::{Completion, DisclosureGate};
use super::{Epoch, Outcome, SubmissionState};
use crate::validator::{self, CandidateInput, Selection, ValidationError};
use rand::Rng;
use slog::{debug, info, trace, warn, Logger};
use std::time::Instant;

/// Everything the caller needs to issue the network exchange of one cycle.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub epoch: Epoch,
    pub candidate: CandidateInput,
}

/// Lifecycle of a single document submission.
///
/// Network completion and clock completion are independent inputs; the
/// buffered outcome is disclosed only after both happened.
#[derive(Debug)]
pub struct Submission {
    state: SubmissionState,
    candidate: Option<CandidateInput>,
    error: Option<ValidationError>,
    message: Option<String>,
    progress: u8,
    clock: Option<AnimationClock>,
    gate: DisclosureGate,
    epoch: Epoch,
    profile: ClockProfile,
    logger: Logger,
}

impl Submission {
    pub fn new(profile: ClockProfile, logger: Logger) -> Self {
        trace!(logger, "Creating submission with {:?} clock", profile);
        Self {
            state: SubmissionState::Idle,
            candidate: None,
            error: None,
            message: None,
            progress: 0,
            clock: None,
            gate: DisclosureGate::new(),
            epoch: Epoch::default(),
            profile,
            logger,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn candidate(&self) -> Option<&CandidateInput> {
        self.candidate.as_ref()
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Decision or failure text of a resolved submission.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Next clock deadline, if the clock is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.clock.as_ref().map(AnimationClock::next_tick)
    }

    /// Replaces the held input with a freshly validated one.
    pub fn select(&mut self, selection: Option<Selection>) -> Result<(), ActionError> {
        if self.state.is_in_progress() {
            warn!(self.logger, "Selection rejected: submission {} in progress", self.epoch);
            return Err(ActionError::SubmissionInProgress);
        }
        self.error = None;
        self.message = None;
        self.progress = 0;
        self.enter(SubmissionState::Idle);

        match validator::validate(selection) {
            Ok(candidate) => {
                info!(
                    self.logger,
                    "Selected {} ({} bytes)",
                    candidate.name(),
                    candidate.size()
                );
                self.candidate = Some(candidate);
            }
            Err(e) => {
                info!(self.logger, "Selection is invalid: {:?}", e);
                self.candidate = None;
                self.error = Some(e);
            }
        }
        Ok(())
    }

    /// Starts a new cycle: enters `Uploading` and starts the clock.
    pub fn submit(
        &mut self,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Result<SubmitTicket, ActionError> {
        if self.state.is_in_progress() {
            warn!(self.logger, "Submit rejected: submission {} in progress", self.epoch);
            return Err(ActionError::SubmissionInProgress);
        }
        self.error = None;
        self.message = None;

        let candidate = match &self.candidate {
            Some(c) => c.clone(),
            None => {
                info!(self.logger, "Submit without a valid file");
                self.error = Some(ValidationError::Missing);
                return Err(ActionError::NothingToSubmit);
            }
        };

        self.epoch = self.epoch.next();
        self.progress = 0;
        self.gate = DisclosureGate::new();
        let clock = AnimationClock::start(self.profile, now, rng);
        debug!(
            self.logger,
            "Submission {} started, animation takes {:?}",
            self.epoch,
            clock.target()
        );
        self.clock = Some(clock);
        self.enter(SubmissionState::Uploading);

        Ok(SubmitTicket {
            epoch: self.epoch,
            candidate,
        })
    }

    /// Advances the clock. Returns `true` if this tick disclosed the outcome.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.state.is_in_progress() {
            return false;
        }
        let clock = match self.clock.as_mut() {
            Some(clock) => clock,
            None => return false,
        };
        self.progress = clock.tick(now);
        if !clock.is_complete() {
            return false;
        }

        debug!(self.logger, "Animation of submission {} finished", self.epoch);
        self.clock = None;
        self.converge(Completion::ClockFinished)
    }

    /// Buffers the network outcome of cycle `epoch`. Returns `true` if it was
    /// disclosed right away because the animation had already finished.
    pub fn complete(&mut self, epoch: Epoch, outcome: Outcome) -> bool {
        if epoch != self.epoch || !self.state.is_in_progress() {
            debug!(
                self.logger,
                "Ignoring stale outcome of submission {} (current {}, {})",
                epoch,
                self.epoch,
                self.state
            );
            return false;
        }
        debug!(
            self.logger,
            "Outcome of submission {} buffered: accepted={}",
            epoch,
            outcome.is_accepted()
        );
        if self.state == SubmissionState::Uploading && !self.gate.clock_finished() {
            self.enter(SubmissionState::Animating);
        }
        self.converge(Completion::OutcomeArrived(outcome))
    }

    /// Returns every piece of state to its initial value.
    pub fn reset(&mut self) -> Result<(), ActionError> {
        if self.state.is_in_progress() {
            warn!(self.logger, "Reset rejected: submission {} in progress", self.epoch);
            return Err(ActionError::SubmissionInProgress);
        }
        // From Idle only a validation error can be reset; a held input stays.
        if self.state == SubmissionState::Idle && self.error.is_none() {
            return Err(ActionError::NothingToReset);
        }

        self.candidate = None;
        self.error = None;
        self.message = None;
        self.progress = 0;
        self.clock = None;
        self.gate = DisclosureGate::new();
        self.epoch = self.epoch.next();
        self.enter(SubmissionState::Idle);
        info!(self.logger, "Reset, now at epoch {}", self.epoch);
        Ok(())
    }

    fn converge(&mut self, event: Completion) -> bool {
        let outcome = match self.gate.on_event(event) {
            Some(outcome) => outcome,
            None => return false,
        };
        self.message = Some(outcome.message().to_string());
        self.clock = None;
        if outcome.is_accepted() {
            self.enter(SubmissionState::ResolvedSuccess);
        } else {
            self.enter(SubmissionState::ResolvedFailure);
        }
        info!(
            self.logger,
            "Submission {} disclosed: {}",
            self.epoch,
            outcome.message()
        );
        true
    }

    fn enter(&mut self, state: SubmissionState) {
        if self.state != state {
            trace!(self.logger, "State {} -> {}", self.state, state);
            self.state = state;
        }
    }
}
