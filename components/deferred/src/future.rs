//! The deferred-value object and its chaining operation.
//!
//! A [`Future`] represents a value not yet known. It settles exactly once,
//! through its paired [`Settler`], and consumers compose pipelines with
//! [`Future::then`]. Every reaction is dispatched through the scheduler and
//! runs in a later turn, never inline with the call that registered it or
//! the call that settled the future.

use crate::scheduler::{Schedule, SchedulerHandle, Task};
use crate::settler::Settler;
use core_types::{SettleFn, Thenable, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The state of a Future.
///
/// Transitions are monotonic: `Pending → Fulfilled` or `Pending →
/// Rejected`, exactly once. A settled future never changes state again.
#[derive(Debug, Clone, PartialEq)]
pub enum FutureState {
    /// The initial state; the future is neither fulfilled nor rejected.
    Pending,
    /// The future settled with a value.
    Fulfilled,
    /// The future settled with a rejection reason.
    Rejected,
}

/// A unary callback registered via [`Future::then`].
///
/// The error channel is the "thrown value" path: a handler that returns
/// `Err(reason)` rejects the chained future with that reason.
pub struct Handler {
    callback: Box<dyn FnMut(Value) -> Result<Value, Value>>,
}

impl Handler {
    /// Creates a new Handler from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(Value) -> Result<Value, Value> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Calls the handler with the given value.
    pub fn call(&mut self, value: Value) -> Result<Value, Value> {
        (self.callback)(value)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler {{ ... }}")
    }
}

/// Which settled branch a reaction should take.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Disposition {
    Fulfill,
    Reject,
}

/// A reaction registered on a pending future: the optional handlers from a
/// `then` call plus the settler of the chained future they feed.
pub(crate) struct Reaction {
    pub(crate) on_fulfilled: Option<Handler>,
    pub(crate) on_rejected: Option<Handler>,
    pub(crate) settler: Settler,
}

/// Runs one reaction against a settled value.
///
/// Both dispositions funnel through here: an absent handler forwards the
/// value with the same disposition; a present handler's normal return
/// resolves (assimilating thenables) and its error return rejects. This is
/// the only place handler results are interpreted.
pub(crate) fn run_reaction(reaction: Reaction, disposition: Disposition, value: Value) {
    let Reaction {
        on_fulfilled,
        on_rejected,
        settler,
    } = reaction;

    let handler = match disposition {
        Disposition::Fulfill => on_fulfilled,
        Disposition::Reject => on_rejected,
    };

    match handler {
        Some(mut handler) => match handler.call(value) {
            Ok(result) => settler.resolve(result),
            Err(reason) => settler.reject(reason),
        },
        None => match disposition {
            Disposition::Fulfill => settler.fulfill(value),
            Disposition::Reject => settler.reject(value),
        },
    }
}

/// The mutable state shared between a Future and its Settler.
///
/// Written only through the settler's operations; the future side reads.
pub(crate) struct FutureCore {
    pub(crate) state: FutureState,
    pub(crate) settled: Value,
    pub(crate) reactions: Vec<Reaction>,
}

/// A deferred value that settles exactly once.
///
/// `Future` is a cheap clonable handle; any number of consumers may hold
/// and chain on the same future. Its state changes only through the
/// [`Settler`] handed to the setup procedure at creation.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use deferred::{Future, FutureState, TaskQueue};
///
/// let queue = TaskQueue::new();
/// let future = Future::create(&queue.handle(), |settler| {
///     settler.fulfill(Value::Smi(42));
///     Ok(())
/// });
///
/// assert_eq!(future.state(), FutureState::Fulfilled);
/// assert_eq!(future.settled_value(), Some(Value::Smi(42)));
/// ```
#[derive(Clone)]
pub struct Future {
    pub(crate) core: Rc<RefCell<FutureCore>>,
    pub(crate) scheduler: Rc<dyn Schedule>,
}

impl Future {
    /// Allocates a pending future together with its settler.
    pub(crate) fn pending(scheduler: Rc<dyn Schedule>) -> (Future, Settler) {
        let core = Rc::new(RefCell::new(FutureCore {
            state: FutureState::Pending,
            settled: Value::Undefined,
            reactions: Vec::new(),
        }));
        let future = Future {
            core: Rc::clone(&core),
            scheduler: Rc::clone(&scheduler),
        };
        let settler = Settler { core, scheduler };
        (future, settler)
    }

    /// Creates a future and runs `setup` with its settler, synchronously.
    ///
    /// The settler is the only write capability for the new future; by
    /// handing it to `setup` alone, only the creating code may settle. A
    /// `setup` that returns `Err` rejects the future with that reason, so
    /// every future ends up in a canonical state regardless of how its
    /// setup went.
    ///
    /// # Arguments
    ///
    /// * `scheduler` - Deferral capability for reaction dispatch
    /// * `setup` - Procedure that receives the settler and begins the work
    pub fn create<F>(scheduler: &SchedulerHandle, setup: F) -> Future
    where
        F: FnOnce(&Settler) -> Result<(), Value>,
    {
        let (future, settler) = Future::pending(Rc::clone(scheduler));
        if let Err(reason) = setup(&settler) {
            settler.reject(reason);
        }
        future
    }

    /// Creates a future already fulfilled with `value`.
    pub fn of(scheduler: &SchedulerHandle, value: Value) -> Future {
        Future::create(scheduler, |settler| {
            settler.fulfill(value);
            Ok(())
        })
    }

    /// Creates a future already rejected with `reason`.
    pub fn rejected(scheduler: &SchedulerHandle, reason: Value) -> Future {
        Future::create(scheduler, |settler| {
            settler.reject(reason);
            Ok(())
        })
    }

    /// Returns the current state.
    pub fn state(&self) -> FutureState {
        self.core.borrow().state.clone()
    }

    /// Returns the settled value or rejection reason, once settled.
    pub fn settled_value(&self) -> Option<Value> {
        let core = self.core.borrow();
        match core.state {
            FutureState::Pending => None,
            _ => Some(core.settled.clone()),
        }
    }

    /// Returns true if reactions are queued awaiting settlement.
    pub fn has_pending_reactions(&self) -> bool {
        !self.core.borrow().reactions.is_empty()
    }

    /// Adds handlers for fulfillment and/or rejection.
    ///
    /// Returns a new future whose settlement is determined by running the
    /// handler matching this future's eventual disposition against its
    /// settled value. An absent handler passes the value or reason through
    /// with the same disposition, so `then(None, None)` mirrors this
    /// future one turn later.
    ///
    /// If this future is still pending the reaction is queued; if it has
    /// already settled the reaction is scheduled instead. Either way the
    /// handler runs in a later turn, never inside this call.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    /// use deferred::{Future, Handler, TaskQueue};
    ///
    /// let queue = TaskQueue::new();
    /// let doubled = Future::of(&queue.handle(), Value::Smi(21)).then(
    ///     Some(Handler::new(|value| match value {
    ///         Value::Smi(n) => Ok(Value::Smi(n * 2)),
    ///         other => Ok(other),
    ///     })),
    ///     None,
    /// );
    ///
    /// queue.run_until_idle().unwrap();
    /// assert_eq!(doubled.settled_value(), Some(Value::Smi(42)));
    /// ```
    pub fn then(&self, on_fulfilled: Option<Handler>, on_rejected: Option<Handler>) -> Future {
        let (chained, chained_settler) = Future::pending(Rc::clone(&self.scheduler));
        let reaction = Reaction {
            on_fulfilled,
            on_rejected,
            settler: chained_settler,
        };

        let mut core = self.core.borrow_mut();
        let disposition = match core.state {
            FutureState::Pending => {
                core.reactions.push(reaction);
                return chained;
            }
            FutureState::Fulfilled => Disposition::Fulfill,
            FutureState::Rejected => Disposition::Reject,
        };
        let value = core.settled.clone();
        drop(core);

        self.scheduler.schedule(Task::new(move || {
            run_reaction(reaction, disposition, value);
            Ok(())
        }));
        chained
    }
}

impl fmt::Debug for Future {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core.borrow();
        f.debug_struct("Future")
            .field("state", &core.state)
            .field("reactions", &core.reactions.len())
            .finish()
    }
}

/// A future is itself a thenable, so one produced here assimilates through
/// the same open-world path as any foreign implementation.
impl Thenable for Future {
    fn invoke_then(&self, on_fulfilled: SettleFn, on_rejected: SettleFn) -> Result<(), Value> {
        let mut on_fulfilled = on_fulfilled;
        let mut on_rejected = on_rejected;
        self.then(
            Some(Handler::new(move |value| {
                on_fulfilled(value.clone());
                Ok(value)
            })),
            Some(Handler::new(move |reason| {
                on_rejected(reason.clone());
                Err(reason)
            })),
        );
        Ok(())
    }
}

/// Wraps a future as a value, so it can settle another future.
impl From<Future> for Value {
    fn from(future: Future) -> Self {
        Value::Thenable(Rc::new(future))
    }
}
