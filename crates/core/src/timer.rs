//! Turn timer - single-shot, cancellable countdown
//!
//! At most one deadline is ever pending. [`TurnTimer::schedule`] overwrites the
//! previous deadline, so time already counted against an old turn can never
//! expire the new one.
//!
//! The timer does not read a clock. The owner feeds it elapsed time with
//! [`TurnTimer::advance`], which keeps the engine deterministic and lets the
//! async session runtime decide how real time maps onto ticks.

/// Turn countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnTimer {
    delay_ms: u32,
    remaining_ms: Option<u32>,
}

impl TurnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending deadline with a fresh one
    pub fn schedule(&mut self, delay_ms: u32) {
        self.delay_ms = delay_ms;
        self.remaining_ms = Some(delay_ms);
    }

    /// Drop the pending deadline, if any
    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    /// Count down by `elapsed_ms`; returns true if the deadline was reached
    ///
    /// Reaching the deadline disarms the timer; the caller reschedules.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        match self.remaining_ms {
            Some(remaining) if elapsed_ms >= remaining => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - elapsed_ms);
                false
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Length of the most recently scheduled turn
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}
