use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};

use super::{Scheduler, TimerError, TimerToken};
use crate::jobs;

/// Scheduler backed by a `calloop` event loop.
///
/// Fired timers are queued with [`jobs::push_fired`]; the host drains them
/// with [`jobs::drain_fired`] after each dispatch and routes them to its
/// controllers. Cancelling removes the timer source from the loop, so a
/// cancelled timer cannot fire.
pub struct CalloopScheduler<'l, Data> {
    handle: LoopHandle<'l, Data>,
    registrations: Rc<RefCell<HashMap<TimerToken, RegistrationToken>>>,
}

impl<'l, Data> CalloopScheduler<'l, Data> {
    pub fn new(handle: LoopHandle<'l, Data>) -> Self {
        Self {
            handle,
            registrations: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Number of timers still registered with the loop
    pub fn pending(&self) -> usize {
        self.registrations.borrow().len()
    }
}

impl<Data> Clone for CalloopScheduler<'_, Data> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            registrations: self.registrations.clone(),
        }
    }
}

impl<Data> Scheduler for CalloopScheduler<'_, Data> {
    fn schedule(&self, delay: Duration) -> Result<TimerToken, TimerError> {
        let token = TimerToken::next();
        let registrations = self.registrations.clone();
        let registration = self
            .handle
            .insert_source(Timer::from_duration(delay), move |_deadline, _, _| {
                registrations.borrow_mut().remove(&token);
                jobs::push_fired(token);
                TimeoutAction::Drop
            })
            .map_err(|err| TimerError::Rejected(err.error.to_string()))?;
        self.registrations.borrow_mut().insert(token, registration);
        log::trace!("Armed calloop timer {:?} for {:?}", token, delay);
        Ok(token)
    }

    fn cancel(&self, token: TimerToken) {
        let registration = self.registrations.borrow_mut().remove(&token);
        if let Some(registration) = registration {
            self.handle.remove(registration);
            log::trace!("Removed calloop timer {:?}", token);
        }
    }
}
