use crate::node::NodeRef;

use super::PhaseEvent;

type Callback<N> = Box<dyn FnMut(&NodeRef<N>, &PhaseEvent)>;

/// Phase boundaries a host can hook into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Hook {
    EnterStart,
    EnteringApply,
    EnteredSettle,
    ExitStart,
    ExitingApply,
    ExitedSettle,
}

/// Lifecycle callbacks of a collapse controller.
///
/// All optional. A panic inside a callback is not caught and unwinds into
/// the host.
///
/// # Example
/// ```
/// use collapse_transition::collapse::CollapseCallbacks;
/// use collapse_transition::node::HeadlessNode;
///
/// let callbacks = CollapseCallbacks::<HeadlessNode>::new()
///     .on_entered_settle(|_node, event| log::info!("open at {}", event.size))
///     .on_exited_settle(|_node, _| log::info!("closed"));
/// ```
pub struct CollapseCallbacks<N> {
    enter_start: Option<Callback<N>>,
    entering_apply: Option<Callback<N>>,
    entered_settle: Option<Callback<N>>,
    exit_start: Option<Callback<N>>,
    exiting_apply: Option<Callback<N>>,
    exited_settle: Option<Callback<N>>,
}

impl<N> CollapseCallbacks<N> {
    pub fn new() -> Self {
        Self {
            enter_start: None,
            entering_apply: None,
            entered_settle: None,
            exit_start: None,
            exiting_apply: None,
            exited_settle: None,
        }
    }

    /// Called after the container was collapsed to its start size, before
    /// the content is measured.
    pub fn on_enter_start<F: FnMut(&NodeRef<N>, &PhaseEvent) + 'static>(mut self, f: F) -> Self {
        self.enter_start = Some(Box::new(f));
        self
    }

    /// Called once the target height and timing were applied.
    pub fn on_entering_apply<F: FnMut(&NodeRef<N>, &PhaseEvent) + 'static>(
        mut self,
        f: F,
    ) -> Self {
        self.entering_apply = Some(Box::new(f));
        self
    }

    /// Called when the expand completed and the height was released to auto.
    pub fn on_entered_settle<F: FnMut(&NodeRef<N>, &PhaseEvent) + 'static>(
        mut self,
        f: F,
    ) -> Self {
        self.entered_settle = Some(Box::new(f));
        self
    }

    /// Called after the height was pinned to its start value.
    pub fn on_exit_start<F: FnMut(&NodeRef<N>, &PhaseEvent) + 'static>(mut self, f: F) -> Self {
        self.exit_start = Some(Box::new(f));
        self
    }

    pub fn on_exiting_apply<F: FnMut(&NodeRef<N>, &PhaseEvent) + 'static>(
        mut self,
        f: F,
    ) -> Self {
        self.exiting_apply = Some(Box::new(f));
        self
    }

    pub fn on_exited_settle<F: FnMut(&NodeRef<N>, &PhaseEvent) + 'static>(
        mut self,
        f: F,
    ) -> Self {
        self.exited_settle = Some(Box::new(f));
        self
    }

    pub(crate) fn invoke(&mut self, hook: Hook, node: &NodeRef<N>, event: &PhaseEvent) {
        let slot = match hook {
            Hook::EnterStart => &mut self.enter_start,
            Hook::EnteringApply => &mut self.entering_apply,
            Hook::EnteredSettle => &mut self.entered_settle,
            Hook::ExitStart => &mut self.exit_start,
            Hook::ExitingApply => &mut self.exiting_apply,
            Hook::ExitedSettle => &mut self.exited_settle,
        };
        if let Some(callback) = slot {
            callback(node, event);
        }
    }
}

impl<N> Default for CollapseCallbacks<N> {
    fn default() -> Self {
        Self::new()
    }
}
