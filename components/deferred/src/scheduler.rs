//! Deferred-callback scheduling.
//!
//! Every reaction a future dispatches must run in a later turn than the
//! call that triggered it, never inline. This module provides that
//! deferral point as an injectable capability: the [`Schedule`] trait, and
//! [`TaskQueue`], a FIFO queue with a manual run loop. The same queue,
//! pumped by hand, doubles as the deterministic scheduler used in tests.

use core_types::Fault;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A unit of deferred work.
///
/// Reaction tasks produced by the deferred core are infallible; the error
/// channel exists for arbitrary tasks sharing the queue, whose failures
/// propagate out of the run loop as a [`Fault`].
pub struct Task {
    callback: Box<dyn FnOnce() -> Result<(), Fault>>,
}

impl Task {
    /// Creates a new Task from a closure.
    ///
    /// # Arguments
    ///
    /// * `f` - The function to execute when the task runs
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<(), Fault> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Executes the task.
    pub fn run(self) -> Result<(), Fault> {
        (self.callback)()
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task {{ ... }}")
    }
}

/// The capability to run a task in a later turn.
///
/// Futures hold this as `Rc<dyn Schedule>` rather than a concrete queue,
/// so the deferral mechanism stays injectable.
pub trait Schedule {
    /// Enqueues a task for execution in a later turn.
    fn schedule(&self, task: Task);
}

/// A shared handle to a scheduler.
pub type SchedulerHandle = Rc<dyn Schedule>;

/// A FIFO queue of deferred tasks with a manual run loop.
///
/// `TaskQueue` is a cheap clonable handle; all clones share one queue.
/// Tasks enqueued while draining run in the same drain, which is what lets
/// a multi-link future chain settle under a single [`run_until_idle`] call.
///
/// [`run_until_idle`]: TaskQueue::run_until_idle
///
/// # Examples
///
/// ```
/// use deferred::{Task, TaskQueue};
///
/// let queue = TaskQueue::new();
/// queue.schedule_task(Task::new(|| Ok(())));
/// let ran = queue.run_until_idle().unwrap();
/// assert_eq!(ran, 1);
/// ```
#[derive(Clone, Default)]
pub struct TaskQueue {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl TaskQueue {
    /// Creates a new empty TaskQueue.
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Returns this queue as an injectable scheduler handle.
    pub fn handle(&self) -> SchedulerHandle {
        Rc::new(self.clone())
    }

    /// Adds a task to the end of the queue.
    pub fn schedule_task(&self, task: Task) {
        self.queue.borrow_mut().push_back(task);
    }

    /// Runs the next task, if any.
    ///
    /// Returns `Ok(true)` if a task ran, `Ok(false)` if the queue was
    /// empty, or the task's fault.
    pub fn run_next(&self) -> Result<bool, Fault> {
        // The borrow ends before the task runs, so tasks may re-enqueue.
        let task = self.queue.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task.run()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs tasks until the queue is empty, including tasks enqueued while
    /// draining.
    ///
    /// Returns the number of tasks that ran. A task failure stops the
    /// drain and propagates.
    pub fn run_until_idle(&self) -> Result<usize, Fault> {
        let mut ran = 0;
        while self.run_next()? {
            ran += 1;
        }
        Ok(ran)
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Returns the number of queued tasks.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Schedule for TaskQueue {
    fn schedule(&self, task: Task) {
        self.schedule_task(task);
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("len", &self.len())
            .finish()
    }
}
