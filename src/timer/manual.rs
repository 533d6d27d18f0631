use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::{Scheduler, TimerError, TimerToken};

#[derive(Debug)]
struct ManualState {
    elapsed: Duration,
    timers: Vec<(Duration, TimerToken)>,
    available: bool,
    cancelled: usize,
}

/// Virtual-clock scheduler.
///
/// Time only moves when the host calls [`ManualScheduler::advance`], which
/// makes transitions fully deterministic. Clones share the same clock and
/// timer set.
#[derive(Clone, Debug)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::with_availability(true)
    }

    /// A scheduler that refuses every timer, as a host without a timer
    /// facility would.
    pub fn unavailable() -> Self {
        Self::with_availability(false)
    }

    fn with_availability(available: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                elapsed: Duration::ZERO,
                timers: Vec::new(),
                available,
                cancelled: 0,
            })),
        }
    }

    /// Time advanced so far
    pub fn elapsed(&self) -> Duration {
        self.state.borrow().elapsed
    }

    /// Advance the clock and return the timers that came due, earliest first.
    pub fn advance(&self, by: Duration) -> Vec<TimerToken> {
        let mut state = self.state.borrow_mut();
        state.elapsed = state.elapsed.saturating_add(by);
        let now = state.elapsed;
        let mut due: Vec<_> = state
            .timers
            .iter()
            .copied()
            .filter(|(deadline, _)| *deadline <= now)
            .collect();
        state.timers.retain(|(deadline, _)| *deadline > now);
        due.sort();
        due.into_iter().map(|(_, token)| token).collect()
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Deadline of `token`, relative to the scheduler's start
    pub fn deadline(&self, token: TimerToken) -> Option<Duration> {
        self.state
            .borrow()
            .timers
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(deadline, _)| *deadline)
    }

    /// Number of timers cancelled while still armed
    pub fn cancelled(&self) -> usize {
        self.state.borrow().cancelled
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration) -> Result<TimerToken, TimerError> {
        let mut state = self.state.borrow_mut();
        if !state.available {
            return Err(TimerError::Unavailable);
        }
        let token = TimerToken::next();
        let deadline = state.elapsed.saturating_add(delay);
        state.timers.push((deadline, token));
        Ok(token)
    }

    fn cancel(&self, token: TimerToken) {
        let mut state = self.state.borrow_mut();
        let before = state.timers.len();
        state.timers.retain(|(_, t)| *t != token);
        if state.timers.len() != before {
            state.cancelled += 1;
        }
    }
}
