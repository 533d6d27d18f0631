//! Animated expand/collapse of a container's height.
//!
//! A [`CollapseController`] reacts to a boolean visible input by animating
//! its node between zero and the natural height of the children:
//!
//! - **Enter**: collapse to the start size, measure the content, transition
//!   to that height, then release the height to `auto` so later content
//!   growth is not clipped.
//! - **Exit**: pin the current height (a transition cannot start from
//!   `auto`), then transition to zero.
//!
//! Completion arrives either as a native [`TransitionEnd`] for the height
//! property (fixed timeouts) or as a fallback timer (auto timeouts, whose
//! duration the rendering layer never saw, and transitions between equal
//! heights, which a styling layer never reports). The choice is made when
//! the transition starts. Only one timer is ever armed,
//! and it is cancelled whenever a new transition starts or the controller
//! is torn down.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::{Duration, Instant};
//!
//! use collapse_transition::prelude::*;
//!
//! let node = Rc::new(RefCell::new(HeadlessNode::new(120.0, Instant::now())));
//! let scheduler = ManualScheduler::new();
//! let mut controller = CollapseController::new(
//!     NodeRef::new(&node),
//!     scheduler.clone(),
//!     CollapseConfig::new().timeout(Timeout::Auto),
//!     CollapseCallbacks::new(),
//! )?;
//!
//! controller.set_visible(true)?;
//! assert_eq!(controller.phase(), Phase::Entering);
//!
//! for token in scheduler.advance(Duration::from_secs(1)) {
//!     controller.handle_timer(token);
//! }
//! assert_eq!(controller.phase(), Phase::Entered);
//! # Ok::<(), collapse_transition::CollapseError>(())
//! ```

mod callbacks;
mod config;
mod phase;
mod style;

pub use callbacks::CollapseCallbacks;
pub use config::CollapseConfig;
pub use phase::{Phase, PhaseEvent};
pub use style::{ContainerStyle, Overflow, Visibility};

use callbacks::Hook;

use crate::animation::{resolve_timing, Direction, Timeout, TimingSpec};
use crate::error::Result;
use crate::node::{CollapseNode, NodeRef, SizeStyle, StyleProperty, TransitionEnd};
use crate::timer::{PendingTimer, Scheduler, TimerKind, TimerToken};

/// Drives the collapse transition of one container.
pub struct CollapseController<N: CollapseNode, S: Scheduler> {
    node: NodeRef<N>,
    scheduler: S,
    config: CollapseConfig,
    callbacks: CollapseCallbacks<N>,
    phase: Phase,
    visible: bool,
    appearing: bool,
    /// Size sampled when the current transition started
    measured: f32,
    timing: Option<TimingSpec>,
    pending: Option<PendingTimer>,
    /// The running transition settles on a native height end
    native_end: bool,
    torn_down: bool,
}

impl<N: CollapseNode, S: Scheduler> CollapseController<N, S> {
    /// Create a controller for `node`.
    ///
    /// Starts `Entered` or `Exited` according to `config.visible`. With
    /// `config.appear` set and initially visible, the enter transition runs
    /// right away instead.
    pub fn new(
        node: NodeRef<N>,
        scheduler: S,
        config: CollapseConfig,
        callbacks: CollapseCallbacks<N>,
    ) -> Result<Self> {
        let visible = config.visible;
        let appear = config.appear;
        let mut controller = Self {
            node,
            scheduler,
            config,
            callbacks,
            phase: if visible { Phase::Entered } else { Phase::Exited },
            visible,
            appearing: false,
            measured: 0.0,
            timing: None,
            pending: None,
            native_end: false,
            torn_down: false,
        };

        if visible && appear {
            controller.phase = Phase::Exited;
            controller.appearing = true;
            controller.start_enter()?;
        } else if visible {
            controller.measured = controller.natural_size();
            controller.snap(SizeStyle::Auto);
        } else {
            controller.snap(SizeStyle::Px(0.0));
        }

        Ok(controller)
    }

    /// Feed the visible input.
    ///
    /// Unchanged values are ignored. A change starts the matching
    /// transition, reversing the running one if needed. Fails only when the
    /// completion timer cannot be armed.
    pub fn set_visible(&mut self, visible: bool) -> Result<()> {
        if self.torn_down {
            log::debug!("Ignoring visible={} on torn down collapse", visible);
            return Ok(());
        }
        if visible == self.visible {
            return Ok(());
        }

        self.visible = visible;
        self.appearing = false;
        self.disarm();

        if visible {
            self.start_enter()
        } else {
            self.start_exit()
        }
    }

    /// Change the timeout used by the next transition.
    pub fn set_timeout(&mut self, timeout: Timeout) {
        self.config.timeout = timeout;
    }

    /// Route a fired timer. Returns `true` if it completed the current phase.
    pub fn handle_timer(&mut self, token: TimerToken) -> bool {
        let pending = match self.pending {
            Some(pending) if pending.token == token => pending,
            _ => return false,
        };
        self.pending = None;

        if pending.kind == TimerKind::Safety {
            log::debug!(
                "No height transition end while {}, settling from safety timer",
                self.phase
            );
        }
        self.settle();
        true
    }

    /// Route a native end-of-transition signal. Returns `true` if it
    /// completed the current phase.
    ///
    /// Ends for other properties are ignored, and so is everything while a
    /// fallback timer drives the running transition.
    pub fn handle_transition_end(&mut self, end: &TransitionEnd) -> bool {
        if self.torn_down
            || end.property != StyleProperty::Height
            || !self.native_end
            || !self.phase.is_transitioning()
        {
            return false;
        }

        self.disarm();
        self.settle();
        true
    }

    /// Declarative container style for the current phase.
    pub fn style(&self) -> ContainerStyle {
        let entered = self.phase == Phase::Entered;
        let hidden = self.phase == Phase::Exited && !self.visible;
        ContainerStyle {
            height: if entered {
                SizeStyle::Auto
            } else {
                SizeStyle::Px(0.0)
            },
            overflow: if entered {
                Overflow::Visible
            } else {
                Overflow::Hidden
            },
            visibility: if hidden {
                Visibility::Hidden
            } else {
                Visibility::Visible
            },
            ..ContainerStyle::default()
        }
    }

    /// Cancel the pending timer and stop reacting to input. Idempotent;
    /// also runs on drop. No callback fires afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.disarm();
        self.torn_down = true;
        log::debug!("Collapse torn down in phase {}", self.phase);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Size sampled when the latest transition started
    pub fn measured_size(&self) -> f32 {
        self.measured
    }

    /// Timing of the latest transition
    pub fn timing(&self) -> Option<&TimingSpec> {
        self.timing.as_ref()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending.map(|pending| pending.token)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn node(&self) -> &NodeRef<N> {
        &self.node
    }

    pub fn config(&self) -> &CollapseConfig {
        &self.config
    }

    fn start_enter(&mut self) -> Result<()> {
        // Reversing an exit starts from wherever the height is right now
        let start = if self.phase == Phase::Exiting {
            self.rendered_size()
        } else {
            0.0
        };
        self.snap(SizeStyle::Px(start));
        self.set_phase(Phase::Entering);
        self.emit(Hook::EnterStart, SizeStyle::Px(start), None);

        let natural = self.natural_size();
        self.measured = natural;
        let timing = self.resolve(Direction::Enter, natural);
        self.apply(&timing, SizeStyle::Px(natural));
        self.emit(Hook::EnteringApply, SizeStyle::Px(natural), Some(timing.clone()));
        self.arm(timing, start == natural)
    }

    fn start_exit(&mut self) -> Result<()> {
        let start = if self.phase == Phase::Entering {
            self.rendered_size()
        } else {
            self.natural_size()
        };
        self.snap(SizeStyle::Px(start));
        self.set_phase(Phase::Exiting);
        self.emit(Hook::ExitStart, SizeStyle::Px(start), None);

        self.measured = start;
        let timing = self.resolve(Direction::Exit, start);
        self.apply(&timing, SizeStyle::Px(0.0));
        self.emit(Hook::ExitingApply, SizeStyle::Px(0.0), Some(timing.clone()));
        self.arm(timing, start == 0.0)
    }

    fn settle(&mut self) {
        self.native_end = false;
        match self.phase {
            Phase::Entering => {
                self.set_phase(Phase::Entered);
                self.snap(SizeStyle::Auto);
                self.emit(Hook::EnteredSettle, SizeStyle::Auto, None);
            }
            Phase::Exiting => {
                self.set_phase(Phase::Exited);
                self.snap(SizeStyle::Px(0.0));
                self.emit(Hook::ExitedSettle, SizeStyle::Px(0.0), None);
            }
            Phase::Entered | Phase::Exited => {}
        }
        self.appearing = false;
    }

    fn resolve(&self, direction: Direction, measured_px: f32) -> TimingSpec {
        resolve_timing(
            &self.config.timeout,
            direction,
            measured_px,
            self.config.easing.as_ref(),
            &self.config.auto_band,
        )
    }

    /// Arm the completion signal for a transition that just started.
    ///
    /// `unchanged` is set when the height does not move, so no native end
    /// will ever be reported for it.
    fn arm(&mut self, timing: TimingSpec, unchanged: bool) -> Result<()> {
        let duration = timing.duration;
        self.timing = Some(timing);

        // An explicit zero timeout has nothing to wait for
        if duration.is_zero() {
            self.settle();
            return Ok(());
        }

        self.native_end = !self.config.timeout.is_auto() && !unchanged;
        let timer = if self.native_end {
            self.config
                .safety_margin
                .map(|margin| (duration.saturating_add(margin), TimerKind::Safety))
        } else {
            Some((duration, TimerKind::Fallback))
        };

        if let Some((delay, kind)) = timer {
            debug_assert!(self.pending.is_none(), "a completion timer is already armed");
            let token = self.scheduler.schedule(delay)?;
            log::trace!("Armed {:?} timer {:?} for {:?}", kind, token, delay);
            self.pending = Some(PendingTimer { token, kind });
        }
        Ok(())
    }

    fn disarm(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.token);
            log::trace!("Cancelled {:?} timer {:?}", pending.kind, pending.token);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        debug_assert!(
            self.phase.can_transition_to(phase),
            "illegal collapse transition {} -> {}",
            self.phase,
            phase
        );
        log::debug!("Collapse {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn emit(&mut self, hook: Hook, size: SizeStyle, timing: Option<TimingSpec>) {
        if self.torn_down {
            return;
        }
        let event = PhaseEvent {
            phase: self.phase,
            size,
            timing,
            appearing: self.appearing,
        };
        self.callbacks.invoke(hook, &self.node, &event);
    }

    fn natural_size(&self) -> f32 {
        self.node
            .with(|node| node.natural_size())
            .flatten()
            .unwrap_or_else(|| {
                log::warn!("Collapse content is not measurable, assuming 0px");
                0.0
            })
    }

    fn rendered_size(&self) -> f32 {
        self.node
            .with(|node| node.rendered_size())
            .flatten()
            .unwrap_or(0.0)
    }

    fn snap(&self, size: SizeStyle) {
        if self.node.with_mut(|node| node.set_size(size)).is_none() {
            log::trace!("Collapse node is gone, not writing height {}", size);
        }
    }

    fn apply(&self, timing: &TimingSpec, target: SizeStyle) {
        if self
            .node
            .with_mut(|node| node.apply_timing(timing, target))
            .is_none()
        {
            log::trace!("Collapse node is gone, not animating to {}", target);
        }
    }
}

impl<N: CollapseNode, S: Scheduler> Drop for CollapseController<N, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
