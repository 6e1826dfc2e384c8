use rand::Rng;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Cadence of progress updates while a submission is in progress.
pub const TICK_PERIOD: Duration = Duration::from_millis(80);

pub const LINEAR_DURATION: Duration = Duration::from_millis(4000);
pub const HUMANIZED_MIN_MS: u64 = 5000;
pub const HUMANIZED_MAX_MS: u64 = 15000;

/// How the animation clock maps elapsed time to displayed progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockProfile {
    /// Fixed duration, progress proportional to elapsed time.
    Linear,
    /// Random duration, fast up to 88% then crawling to the end.
    Humanized,
}

impl Default for ClockProfile {
    fn default() -> Self {
        ClockProfile::Humanized
    }
}

impl ClockProfile {
    fn target_duration(self, rng: &mut impl Rng) -> Duration {
        match self {
            ClockProfile::Linear => LINEAR_DURATION,
            ClockProfile::Humanized => {
                Duration::from_millis(rng.gen_range(HUMANIZED_MIN_MS..HUMANIZED_MAX_MS))
            }
        }
    }

    pub fn ease(self, linear: f64) -> f64 {
        match self {
            ClockProfile::Linear => linear,
            ClockProfile::Humanized => {
                if linear < 0.8 {
                    linear * 1.1
                } else {
                    0.88 + (linear - 0.8) * 0.6
                }
            }
        }
    }
}

/// Timer state of one submission cycle.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    profile: ClockProfile,
    start: Instant,
    target: Duration,
    progress: u8,
    next_tick: Instant,
}

impl AnimationClock {
    pub fn start(profile: ClockProfile, now: Instant, rng: &mut impl Rng) -> Self {
        Self::with_target(profile, now, profile.target_duration(rng))
    }

    pub fn with_target(profile: ClockProfile, now: Instant, target: Duration) -> Self {
        Self {
            profile,
            start: now,
            target,
            progress: 0,
            next_tick: now + TICK_PERIOD,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    /// When the event loop should call [`AnimationClock::tick`] next.
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Recomputes progress for `now`. Never moves backwards.
    pub fn tick(&mut self, now: Instant) -> u8 {
        let elapsed = now.saturating_duration_since(self.start);
        let linear = if self.target.as_nanos() == 0 {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.target.as_secs_f64()).min(1.0)
        };
        let eased = self.profile.ease(linear);
        let progress = (eased * 100.0).round().max(0.0).min(100.0) as u8;

        self.progress = self.progress.max(progress);
        while self.next_tick <= now {
            self.next_tick += TICK_PERIOD;
        }
        self.progress
    }
}
