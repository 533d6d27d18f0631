use std::fmt;

use crate::animation::TimingSpec;
use crate::node::SizeStyle;

/// State of the collapse transition.
///
/// Cycles `Exited -> Entering -> Entered -> Exiting -> Exited`. Reversing
/// mid-flight jumps straight between `Entering` and `Exiting`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Exited,
    Entering,
    Entered,
    Exiting,
}

impl Phase {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Phase::Entering | Phase::Exiting)
    }

    /// Whether the state machine may move from `self` to `next`.
    pub fn can_transition_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Exited, Phase::Entering)
                | (Phase::Entering, Phase::Entered)
                | (Phase::Entered, Phase::Exiting)
                | (Phase::Exiting, Phase::Exited)
                | (Phase::Entering, Phase::Exiting)
                | (Phase::Exiting, Phase::Entering)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Exited => "exited",
            Phase::Entering => "entering",
            Phase::Entered => "entered",
            Phase::Exiting => "exiting",
        };
        f.write_str(name)
    }
}

/// What a lifecycle callback is told about the boundary it fires at.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseEvent {
    /// Phase the controller is in when the callback runs
    pub phase: Phase,
    /// Size written to the node at this boundary
    pub size: SizeStyle,
    /// Resolved timing, present for the `*_apply` callbacks
    pub timing: Option<TimingSpec>,
    /// True while running the initial enter transition on mount
    pub appearing: bool,
}
