//! Core value types and error handling for the deferred-value runtime.
//!
//! This crate provides the foundational types shared by the runtime
//! components: a tagged dynamic value, the open-world thenable capability,
//! and the fault type reported by scheduled work.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of runtime values
//! - [`Thenable`] - Capability trait for values that expose a callable `then`
//! - [`Fault`] - Failures reported by scheduled tasks
//! - [`FaultKind`] - Categories of task failure
//!
//! # Examples
//!
//! ```
//! use core_types::Value;
//!
//! let num = Value::Smi(42);
//! assert!(!num.is_thenable());
//! assert_eq!(num.to_string(), "42");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod fault;
mod thenable;
mod value;

pub use fault::{Fault, FaultKind};
pub use thenable::{SettleFn, Thenable};
pub use value::Value;
