//! Fault types for scheduled work.
//!
//! Reactions dispatched by the deferred core never fail: every error they
//! encounter is converted into a rejection. Arbitrary tasks sharing the
//! scheduler have no such conversion, so their failures surface as a
//! [`Fault`] from the run loop.

use crate::Value;
use std::fmt;
use thiserror::Error;

/// The category of a task failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// A scheduled task reported failure
    TaskFailed,
    /// An invariant was violated inside the runtime
    Internal,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::TaskFailed => write!(f, "task failed"),
            FaultKind::Internal => write!(f, "internal error"),
        }
    }
}

/// A failure reported by a scheduled task.
///
/// Propagated out of the scheduler's run loop; never produced by future or
/// settler operations, which recover every failure into a rejection.
///
/// # Examples
///
/// ```
/// use core_types::{Fault, FaultKind};
///
/// let fault = Fault::task("fixture exploded");
/// assert_eq!(fault.kind, FaultKind::TaskFailed);
/// assert_eq!(fault.to_string(), "task failed: fixture exploded");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Fault {
    /// The category of failure
    pub kind: FaultKind,
    /// Human-readable description
    pub message: String,
}

impl Fault {
    /// Creates a fault of the given kind.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `TaskFailed` fault.
    pub fn task(message: impl Into<String>) -> Self {
        Self::new(FaultKind::TaskFailed, message)
    }
}

/// Renders a fault as a string value, so a Rust-side failure can be used
/// as a rejection reason.
impl From<Fault> for Value {
    fn from(fault: Fault) -> Self {
        Value::String(fault.to_string())
    }
}
