//! Deferred-value primitive with standards-style thenable assimilation.
//!
//! This crate provides the runtime's future primitive:
//! - [`Future`] - The observable deferred value, settled exactly once
//! - [`Settler`] - The one-time write capability paired with each future
//! - [`TaskQueue`] - The deferred-callback queue reactions dispatch through
//!
//! # Overview
//!
//! A future is created together with its settler by a single factory call
//! that receives a setup procedure. Consumers chain with [`Future::then`],
//! which returns a new future fed by the handler's result. Settlement is
//! idempotent, and every reaction runs in a later turn of the scheduler,
//! never inline.
//!
//! # Examples
//!
//! ## Creating and settling
//!
//! ```
//! use core_types::Value;
//! use deferred::{Future, FutureState, TaskQueue};
//!
//! let queue = TaskQueue::new();
//! let future = Future::create(&queue.handle(), |settler| {
//!     settler.fulfill(Value::Smi(42));
//!     Ok(())
//! });
//! assert_eq!(future.state(), FutureState::Fulfilled);
//! ```
//!
//! ## Chaining
//!
//! ```
//! use core_types::Value;
//! use deferred::{Future, Handler, TaskQueue};
//!
//! let queue = TaskQueue::new();
//! let shouted = Future::of(&queue.handle(), Value::String("hi".to_string())).then(
//!     Some(Handler::new(|value| {
//!         Ok(Value::String(value.to_string().to_uppercase()))
//!     })),
//!     None,
//! );
//!
//! queue.run_until_idle().unwrap();
//! assert_eq!(shouted.settled_value(), Some(Value::String("HI".to_string())));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod future;
pub mod scheduler;
pub mod settler;

// Re-export main types at crate root
pub use future::{Future, FutureState, Handler};
pub use scheduler::{Schedule, SchedulerHandle, Task, TaskQueue};
pub use settler::Settler;
