#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use collapse_transition::prelude::*;

pub type Log = Rc<RefCell<Vec<(&'static str, PhaseEvent)>>>;

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn record(
    log: &Log,
    name: &'static str,
) -> impl FnMut(&NodeRef<HeadlessNode>, &PhaseEvent) + 'static {
    let log = log.clone();
    move |_: &NodeRef<HeadlessNode>, event: &PhaseEvent| {
        log.borrow_mut().push((name, event.clone()))
    }
}

/// Callbacks that append every lifecycle event to `log`.
pub fn recording_callbacks(log: &Log) -> CollapseCallbacks<HeadlessNode> {
    CollapseCallbacks::new()
        .on_enter_start(record(log, "enter_start"))
        .on_entering_apply(record(log, "entering_apply"))
        .on_entered_settle(record(log, "entered_settle"))
        .on_exit_start(record(log, "exit_start"))
        .on_exiting_apply(record(log, "exiting_apply"))
        .on_exited_settle(record(log, "exited_settle"))
}

/// A controller wired to a headless node and a virtual clock, stepped one
/// millisecond at a time the way a host event loop would.
pub struct Harness {
    pub node: Rc<RefCell<HeadlessNode>>,
    pub scheduler: ManualScheduler,
    pub controller: CollapseController<HeadlessNode, ManualScheduler>,
    pub log: Log,
    /// Deliver the node's transition ends to the controller
    pub native_ends: bool,
    origin: Instant,
}

impl Harness {
    pub fn new(content: f32, config: CollapseConfig) -> Self {
        let origin = Instant::now();
        Self::with_node(HeadlessNode::new(content, origin), origin, config)
    }

    pub fn with_node(node: HeadlessNode, origin: Instant, config: CollapseConfig) -> Self {
        init_logging();
        let node = Rc::new(RefCell::new(node));
        let scheduler = ManualScheduler::new();
        let log = Log::default();
        let controller = CollapseController::new(
            NodeRef::new(&node),
            scheduler.clone(),
            config,
            recording_callbacks(&log),
        )
        .expect("controller");
        Self {
            node,
            scheduler,
            controller,
            log,
            native_ends: true,
            origin,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.controller.set_visible(visible).expect("set_visible");
    }

    /// Step the clock by `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        for _ in 0..ms {
            for token in self.scheduler.advance(Duration::from_millis(1)) {
                self.controller.handle_timer(token);
            }

            let now = self.origin + self.scheduler.elapsed();
            let end = self.node.borrow_mut().advance(now);
            if let Some(end) = end {
                if self.native_ends {
                    self.controller.handle_transition_end(&end);
                }
            }

            let style = self.controller.style();
            self.node.borrow_mut().apply_style(&style);
            assert!(self.scheduler.pending() <= 1, "more than one timer armed");
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.log.borrow().iter().map(|(name, _)| *name).collect()
    }

    pub fn events(&self, name: &str) -> Vec<PhaseEvent> {
        self.log
            .borrow()
            .iter()
            .filter(|(n, _)| *n == name)
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.log.borrow().iter().map(|(_, event)| event.phase).collect()
    }

    pub fn rendered(&self) -> f32 {
        self.node.borrow().rendered_size().unwrap_or(0.0)
    }
}
