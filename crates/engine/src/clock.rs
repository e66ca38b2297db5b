//! Gravity clock - fixed-timestep accumulator for gravity ticks
//!
//! The host measures elapsed time however it likes and feeds it in; the clock
//! answers how many gravity ticks are due. Nothing here sleeps.

use std::time::Duration;

use crate::core::Session;
use crate::types::ActionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityClock {
    interval: Duration,
    accumulated: Duration,
}

impl GravityClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Clock running at the session's current speed.
    pub fn for_session(session: &Session) -> Self {
        Self::new(session.gravity_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change speed, keeping time already accumulated.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Time left until the next tick is due.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.accumulated)
    }

    /// Drop any accumulated time (e.g. when a session is paused or left).
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        due
    }

    /// Advance by `elapsed` and send every due tick to `session`.
    ///
    /// The speed is re-read after each tick, so a level up mid-batch takes
    /// effect for the rest of it. Paused or finished sessions accumulate
    /// nothing. Returns the outcome of each tick sent.
    pub fn tick_session(&mut self, session: &mut Session, elapsed: Duration) -> Vec<ActionOutcome> {
        let mut outcomes = Vec::new();
        if session.paused() || session.game_over() {
            self.reset();
            return outcomes;
        }

        self.interval = session.gravity_interval();
        self.accumulated += elapsed;
        while !self.interval.is_zero() && self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            let outcome = session.tick();
            outcomes.push(outcome);
            if session.game_over() {
                self.reset();
                break;
            }
            self.interval = session.gravity_interval();
        }
        outcomes
    }
}
