// ============================================================================
// Fired Timer Queue
// ============================================================================
//
// Event-loop schedulers cannot reach the controller that armed a timer, so
// they queue the fired token here. The host drains the queue once per loop
// iteration and routes every token to its controllers; a controller ignores
// tokens it is not waiting for.

use std::cell::RefCell;

use crate::timer::TimerToken;

thread_local! {
    /// Tokens of timers that fired since the last drain, in firing order.
    static FIRED_TIMERS: RefCell<Vec<TimerToken>> = const { RefCell::new(Vec::new()) };
}

/// Queue a fired timer.
/// A token already waiting in the queue is not queued twice.
pub fn push_fired(token: TimerToken) {
    FIRED_TIMERS.with(|fired| {
        let mut fired = fired.borrow_mut();
        if !fired.contains(&token) {
            fired.push(token);
        }
    });
}

/// Drain all fired timers
pub fn drain_fired() -> Vec<TimerToken> {
    FIRED_TIMERS.with(|fired| std::mem::take(&mut *fired.borrow_mut()))
}

/// Check if any timer fired since the last drain
pub fn has_fired() -> bool {
    FIRED_TIMERS.with(|fired| !fired.borrow().is_empty())
}
