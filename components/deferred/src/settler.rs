//! The one-time write capability paired with a future.
//!
//! A [`Settler`] is the only path by which a future's state changes. Its
//! operations are idempotent after the first effective call: the future's
//! own state is the guard, shared by every settler clone and every
//! callback handed to a foreign thenable, so nothing can settle the same
//! future twice.

use crate::future::{run_reaction, Disposition, FutureCore, FutureState};
use crate::scheduler::{Schedule, Task};
use core_types::{SettleFn, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The write capability for exactly one future.
///
/// Created alongside its future and handed, by convention, only to the
/// setup procedure that created the pair. Clonable because nested resolve
/// callbacks need their own handles; all clones share the future's state
/// as the single source of truth.
///
/// Errors never escape settler operations: every failure either becomes a
/// rejection of the bound future or is dropped because the future already
/// settled.
#[derive(Clone)]
pub struct Settler {
    pub(crate) core: Rc<RefCell<FutureCore>>,
    pub(crate) scheduler: Rc<dyn Schedule>,
}

impl Settler {
    /// Fulfills the bound future with `value`.
    ///
    /// No-op if the future is no longer pending. Otherwise the state
    /// transitions, the value is stored, and every queued reaction is
    /// scheduled, fulfillment branch, in registration order.
    pub fn fulfill(&self, value: Value) {
        self.settle(Disposition::Fulfill, value);
    }

    /// Rejects the bound future with `reason`.
    ///
    /// Symmetric with [`Settler::fulfill`], using the rejection branch of
    /// each queued reaction.
    pub fn reject(&self, reason: Value) {
        self.settle(Disposition::Reject, reason);
    }

    /// Settles with `value`, adopting its outcome if it is a thenable.
    ///
    /// Plain values delegate to [`Settler::fulfill`]. For an object value,
    /// the `then` capability is read under guard: a failing read rejects.
    /// An object without a callable `then` is fulfilled as a plain value.
    /// Otherwise `then` is invoked with two callbacks bound to this
    /// settler's `fulfill` and `reject`; only the first call to either has
    /// any effect. An invocation failure rejects, unless a callback
    /// already fired, in which case the reject is a no-op and the failure
    /// is swallowed.
    ///
    /// The value may be a future from this implementation, a foreign
    /// thenable, or a self-referential thenable. A thenable that never
    /// reports leaves the future pending forever; that is the accepted
    /// outcome, not an error.
    pub fn resolve(&self, value: Value) {
        let Some(object) = value.as_thenable().map(Rc::clone) else {
            self.fulfill(value);
            return;
        };

        match object.then_capability() {
            Err(reason) => self.reject(reason),
            Ok(false) => self.fulfill(value),
            Ok(true) => {
                let fulfill: SettleFn = {
                    let settler = self.clone();
                    Box::new(move |value| settler.fulfill(value))
                };
                let reject: SettleFn = {
                    let settler = self.clone();
                    Box::new(move |reason| settler.reject(reason))
                };
                if let Err(reason) = object.invoke_then(fulfill, reject) {
                    // No-op if a callback already settled the future.
                    self.reject(reason);
                }
            }
        }
    }

    /// The shared settle path: one guarded transition, then the queued
    /// reactions are dispatched asynchronously in registration order.
    fn settle(&self, disposition: Disposition, value: Value) {
        let reactions = {
            let mut core = self.core.borrow_mut();
            if core.state != FutureState::Pending {
                return;
            }
            core.state = match disposition {
                Disposition::Fulfill => FutureState::Fulfilled,
                Disposition::Reject => FutureState::Rejected,
            };
            core.settled = value.clone();
            std::mem::take(&mut core.reactions)
        };

        for reaction in reactions {
            let value = value.clone();
            self.scheduler.schedule(Task::new(move || {
                run_reaction(reaction, disposition, value);
                Ok(())
            }));
        }
    }
}

impl fmt::Debug for Settler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.borrow();
        f.debug_struct("Settler")
            .field("state", &core.state)
            .finish()
    }
}
