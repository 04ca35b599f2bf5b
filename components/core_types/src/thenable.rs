//! The open-world thenable capability.
//!
//! Assimilation must adopt the eventual outcome of any value exposing a
//! callable `then`, regardless of which implementation produced it. The
//! [`Thenable`] trait is that capability check made explicit: no common
//! base type, only "can I read a `then`, and can I invoke it".

use crate::Value;

/// A unary settlement callback handed to a thenable's `then`.
///
/// A thenable may invoke its callbacks any number of times; the settler
/// that created them guards against everything after the first effective
/// call.
pub type SettleFn = Box<dyn FnMut(Value)>;

/// A foreign object that may expose a callable `then`.
///
/// Both operations carry an error channel because, in the open world this
/// trait models, reading the `then` member and invoking it are each allowed
/// to fail with an arbitrary value. Assimilation converts those failures
/// into rejections; they must never escape as panics.
pub trait Thenable {
    /// Reads the `then` capability.
    ///
    /// Returns `Ok(true)` if a callable `then` is present, `Ok(false)` if
    /// the object is a plain value, and `Err(reason)` if the read itself
    /// failed. Most implementations simply have a `then`; the default
    /// reflects that.
    fn then_capability(&self) -> Result<bool, Value> {
        Ok(true)
    }

    /// Invokes `then` with fulfillment and rejection callbacks.
    ///
    /// Returns `Err(reason)` if the invocation failed. An error reported
    /// after one of the callbacks has already fired is discarded by the
    /// caller, since the outcome is fixed at that point.
    fn invoke_then(&self, on_fulfilled: SettleFn, on_rejected: SettleFn) -> Result<(), Value>;
}
