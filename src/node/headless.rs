use std::time::{Duration, Instant};

use bitflags::bitflags;

use crate::animation::{TimingFunction, TimingSpec};
use crate::collapse::{ContainerStyle, Overflow, Visibility};

use super::{CollapseNode, SizeStyle, TransitionEnd};

bitflags! {
    /// Style properties touched since the last [`HeadlessNode::take_changes`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct StyleChanges: u8 {
        const HEIGHT = 1 << 0;
        const TRANSITION = 1 << 1;
        const OVERFLOW = 1 << 2;
        const VISIBILITY = 1 << 3;
    }
}

/// A running height transition
#[derive(Clone, Debug)]
struct HeightTween {
    from: f32,
    to: f32,
    started: Instant,
    timing: TimingSpec,
}

impl HeightTween {
    fn progress(&self, now: Instant) -> f32 {
        if self.timing.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.timing.duration.as_secs_f32()).min(1.0)
    }

    fn value_at(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        let eased = match self.timing.easing {
            Some(ref easing) => easing.evaluate(t),
            // Unstyled transitions use the CSS initial value
            None => TimingFunction::Ease.evaluate(t),
        };
        self.from + (self.to - self.from) * eased
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.timing.duration
    }
}

/// Retained-mode collapse container without a renderer.
///
/// Keeps the height style, interpolates height transitions against a clock
/// the host advances, and reports a [`TransitionEnd`] when one completes.
/// An interrupted transition reports nothing, like a cancelled CSS
/// transition. A transition between equal heights still runs and ends.
/// Useful for tests, for driving custom renderers, and as the model a
/// toolkit binding should follow.
#[derive(Debug)]
pub struct HeadlessNode {
    /// Natural height of the children, `None` while unmounted
    content_height: Option<f32>,
    height: SizeStyle,
    tween: Option<HeightTween>,
    now: Instant,
    style: ContainerStyle,
    changes: StyleChanges,
}

impl HeadlessNode {
    pub fn new(content_height: f32, now: Instant) -> Self {
        Self {
            content_height: Some(content_height.max(0.0)),
            height: SizeStyle::Px(0.0),
            tween: None,
            now,
            style: ContainerStyle::default(),
            changes: StyleChanges::empty(),
        }
    }

    /// A node whose children have not been laid out yet.
    pub fn unmounted(now: Instant) -> Self {
        Self {
            content_height: None,
            ..Self::new(0.0, now)
        }
    }

    /// Update the children's natural height (content grew, shrank, mounted).
    pub fn set_content_height(&mut self, height: Option<f32>) {
        self.content_height = height.map(|h| h.max(0.0));
        if self.height.is_auto() {
            self.changes |= StyleChanges::HEIGHT;
        }
    }

    /// Move the clock to `now`. Returns the end signal if the running
    /// transition completed.
    pub fn advance(&mut self, now: Instant) -> Option<TransitionEnd> {
        self.now = now.max(self.now);
        let finished = self
            .tween
            .as_ref()
            .is_some_and(|tween| tween.is_finished(self.now));
        if finished {
            self.tween = None;
            self.changes |= StyleChanges::HEIGHT;
            return Some(TransitionEnd::height());
        }
        if self.tween.is_some() {
            self.changes |= StyleChanges::HEIGHT;
        }
        None
    }

    /// Store the declarative part of the container style.
    pub fn apply_style(&mut self, style: &ContainerStyle) {
        if style.overflow != self.style.overflow {
            self.changes |= StyleChanges::OVERFLOW;
        }
        if style.visibility != self.style.visibility {
            self.changes |= StyleChanges::VISIBILITY;
        }
        self.style = style.clone();
    }

    pub fn style(&self) -> &ContainerStyle {
        &self.style
    }

    /// The height currently written to the node
    pub fn height(&self) -> SizeStyle {
        self.height
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn is_transitioning(&self) -> bool {
        self.tween.is_some()
    }

    /// Remaining time of the running transition
    pub fn remaining(&self) -> Option<Duration> {
        self.tween.as_ref().map(|tween| {
            tween
                .timing
                .duration
                .saturating_sub(self.now.saturating_duration_since(tween.started))
        })
    }

    pub fn overflow(&self) -> Overflow {
        self.style.overflow
    }

    pub fn visibility(&self) -> Visibility {
        self.style.visibility
    }

    /// Drain the set of properties touched since the last call.
    pub fn take_changes(&mut self) -> StyleChanges {
        std::mem::take(&mut self.changes)
    }

    fn resolve(&self, size: SizeStyle) -> f32 {
        match size {
            SizeStyle::Px(px) => px,
            SizeStyle::Auto => self.content_height.unwrap_or(0.0),
        }
    }

    fn current_height(&self) -> f32 {
        match self.tween {
            Some(ref tween) => tween.value_at(self.now),
            None => self.resolve(self.height),
        }
    }
}

impl CollapseNode for HeadlessNode {
    fn natural_size(&self) -> Option<f32> {
        self.content_height
    }

    fn rendered_size(&self) -> Option<f32> {
        self.content_height.map(|_| self.current_height())
    }

    fn set_size(&mut self, size: SizeStyle) {
        self.tween = None;
        self.height = size;
        self.changes |= StyleChanges::HEIGHT;
    }

    fn apply_timing(&mut self, timing: &TimingSpec, target: SizeStyle) {
        let from = self.current_height();
        let to = self.resolve(target);
        self.height = target;
        self.changes |= StyleChanges::HEIGHT | StyleChanges::TRANSITION;
        // Zero-length transitions never start, so they never end either.
        // Equal endpoints still run for the whole duration.
        self.tween = (!timing.duration.is_zero()).then(|| HeightTween {
            from,
            to,
            started: self.now,
            timing: timing.clone(),
        });
    }
}
