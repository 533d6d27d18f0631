mod auto_duration;
mod resolve;
mod timing;

pub use auto_duration::{estimate_auto_duration, AutoDurationBand};
pub use resolve::{resolve_timing, Direction, Timeout, TimeoutParseError};
pub use timing::{EasingParseError, TimingFunction};

use std::time::Duration;

/// Resolved timing for a single phase transition.
///
/// A fresh value is produced every time a transition starts; nothing keeps
/// it across transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct TimingSpec {
    /// How long the height transition runs
    pub duration: Duration,
    /// Easing curve, or `None` to leave the node's own default in place
    pub easing: Option<TimingFunction>,
}

impl TimingSpec {
    /// Create a timing spec with the given duration and no easing override
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: None,
        }
    }

    /// Set the easing curve
    pub fn easing(mut self, easing: TimingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Duration in whole milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}
