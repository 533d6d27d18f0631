//! Fallback completion timers.
//!
//! A controller asks its [`Scheduler`] for at most one timer at a time and
//! cancels it before asking for the next. Schedulers report fired timers
//! back to the host by [`TimerToken`]; the host hands the token to
//! [`CollapseController::handle_timer`](crate::collapse::CollapseController::handle_timer),
//! which ignores anything but the timer it is currently waiting for.

mod event_loop;
mod manual;

pub use event_loop::CalloopScheduler;
pub use manual::ManualScheduler;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one scheduled timer. Unique across all schedulers in the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub(crate) fn next() -> Self {
        TimerToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("no timer facility is available")]
    Unavailable,
    #[error("timer was rejected by the event loop: {0}")]
    Rejected(String),
}

/// Source of one-shot timers.
pub trait Scheduler {
    /// Arm a timer that fires once after `delay`.
    fn schedule(&self, delay: Duration) -> Result<TimerToken, TimerError>;

    /// Disarm `token`. Cancelling an unknown or already fired token is a no-op.
    fn cancel(&self, token: TimerToken);
}

/// Why a controller is waiting on a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    /// Sole completion signal: auto timeouts and transitions that do not move
    Fallback,
    /// Backstop for a native transition end that never arrives
    Safety,
}

/// The one timer a controller may have in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PendingTimer {
    pub token: TimerToken,
    pub kind: TimerKind,
}
