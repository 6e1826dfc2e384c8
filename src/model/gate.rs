//! Convergence point of the two completion sources of a submission cycle.
//!
//! The animation clock finishing and the network exchange resolving happen in
//! any order. The gate releases the buffered outcome exactly once, on the
//! second of the two events.

use super::Outcome;

/// Events fed into the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    ClockFinished,
    OutcomeArrived(Outcome),
}

/// Buffer for at most one undisclosed outcome.
#[derive(Debug, Default)]
pub struct PendingOutcome(Option<Outcome>);

impl PendingOutcome {
    /// Returns `false` without overwriting when a value is already buffered.
    pub fn put(&mut self, outcome: Outcome) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(outcome);
        true
    }

    pub fn take(&mut self) -> Option<Outcome> {
        self.0.take()
    }
}

#[derive(Debug, Default)]
pub struct DisclosureGate {
    clock_finished: bool,
    pending: PendingOutcome,
    disclosed: bool,
}

impl DisclosureGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock_finished(&self) -> bool {
        self.clock_finished
    }

    /// Records a completion and returns the outcome if it must be disclosed now.
    pub fn on_event(&mut self, event: Completion) -> Option<Outcome> {
        if self.disclosed {
            return None;
        }
        match event {
            Completion::ClockFinished => self.clock_finished = true,
            Completion::OutcomeArrived(outcome) => {
                self.pending.put(outcome);
            }
        }
        if !self.clock_finished {
            return None;
        }
        let outcome = self.pending.take()?;
        self.disclosed = true;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted() -> Outcome {
        Outcome::accepted(Some("Thank you".to_string()))
    }

    #[test]
    fn outcome_first_waits_for_clock() {
        let mut gate = DisclosureGate::new();
        assert_eq!(gate.on_event(Completion::OutcomeArrived(accepted())), None);
        assert!(!gate.clock_finished());
        assert_eq!(gate.on_event(Completion::ClockFinished), Some(accepted()));
        assert!(gate.clock_finished());
    }

    #[test]
    fn clock_first_discloses_on_arrival() {
        let mut gate = DisclosureGate::new();
        assert_eq!(gate.on_event(Completion::ClockFinished), None);
        assert_eq!(
            gate.on_event(Completion::OutcomeArrived(accepted())),
            Some(accepted())
        );
    }

    #[test]
    fn never_discloses_twice() {
        let mut gate = DisclosureGate::new();
        gate.on_event(Completion::ClockFinished);
        assert!(gate.on_event(Completion::OutcomeArrived(accepted())).is_some());
        assert_eq!(gate.on_event(Completion::ClockFinished), None);
        assert_eq!(
            gate.on_event(Completion::OutcomeArrived(Outcome::rejected(None))),
            None
        );
    }

    #[test]
    fn second_outcome_does_not_replace_buffered_one() {
        let mut gate = DisclosureGate::new();
        gate.on_event(Completion::OutcomeArrived(accepted()));
        gate.on_event(Completion::OutcomeArrived(Outcome::rejected(None)));
        assert_eq!(gate.on_event(Completion::ClockFinished), Some(accepted()));
    }
}
