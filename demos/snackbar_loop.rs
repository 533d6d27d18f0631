//! Drives a collapse container from a calloop event loop, toggling it the
//! way a snackbar queue would. Run with `RUST_LOG=debug` to watch phases.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;
use std::time::{Duration, Instant};

use calloop::EventLoop;
use collapse_transition::jobs;
use collapse_transition::prelude::*;

const TOGGLE_EVERY: Duration = Duration::from_millis(700);
const RUN_FOR: Duration = Duration::from_secs(3);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut event_loop: EventLoop<()> = EventLoop::try_new()?;
    let scheduler = CalloopScheduler::new(event_loop.handle());

    let start = Instant::now();
    let node = Rc::new(RefCell::new(HeadlessNode::new(96.0, start)));

    let callbacks = CollapseCallbacks::new()
        .on_entering_apply(|_: &NodeRef<HeadlessNode>, event: &PhaseEvent| {
            if let Some(timing) = &event.timing {
                log::info!("expanding to {} over {}ms", event.size, timing.duration_ms());
            }
        })
        .on_entered_settle(|_: &NodeRef<HeadlessNode>, _: &PhaseEvent| log::info!("snackbar open"))
        .on_exited_settle(|_: &NodeRef<HeadlessNode>, _: &PhaseEvent| log::info!("snackbar closed"));

    let mut controller = CollapseController::new(
        NodeRef::new(&node),
        scheduler,
        CollapseConfig::new().timeout(Timeout::Auto),
        callbacks,
    )?;

    let mut visible = false;
    let mut next_toggle = start;

    while start.elapsed() < RUN_FOR {
        if Instant::now() >= next_toggle {
            visible = !visible;
            controller.set_visible(visible)?;
            next_toggle += TOGGLE_EVERY;
        }

        event_loop.dispatch(Some(Duration::from_millis(16)), &mut ())?;

        for token in jobs::drain_fired() {
            controller.handle_timer(token);
        }

        let end = node.borrow_mut().advance(Instant::now());
        if let Some(end) = end {
            controller.handle_transition_end(&end);
        }

        let style = controller.style();
        let mut view = node.borrow_mut();
        view.apply_style(&style);
        let changes = view.take_changes();
        if !changes.is_empty() {
            log::debug!(
                "{} at {:.1}px ({:?})",
                controller.phase(),
                view.rendered_size().unwrap_or(0.0),
                changes
            );
        }
    }

    Ok(())
}
