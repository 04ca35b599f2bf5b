//! Dynamic value representation.
//!
//! This module provides the core `Value` enum that represents every value
//! the deferred runtime can carry: primitives stored inline, and foreign
//! objects referenced through the [`Thenable`] capability trait.

use crate::Thenable;
use std::fmt;
use std::rc::Rc;

/// Represents any value the runtime can settle a future with.
///
/// The deferred core treats values as opaque: it never inspects a value
/// beyond asking whether it exposes a callable `then` (see
/// [`Value::is_thenable`]). Primitives are stored inline; objects that may
/// participate in thenable assimilation are held behind an `Rc<dyn
/// Thenable>` so foreign implementations can be adopted without a common
/// base type.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let undefined = Value::Undefined;
/// let number = Value::Smi(42);
/// let text = Value::String("boom".to_string());
///
/// assert!(!undefined.is_thenable());
/// assert_eq!(number.to_string(), "42");
/// assert_eq!(text.to_string(), "boom");
/// ```
#[derive(Clone)]
pub enum Value {
    /// The absent value
    Undefined,
    /// The explicit empty value
    Null,
    /// Boolean (true or false)
    Boolean(bool),
    /// Small integer (fits in 32 bits)
    Smi(i32),
    /// IEEE 754 double-precision floating point
    Double(f64),
    /// String value
    String(std::string::String),
    /// Foreign object that may expose a callable `then`
    Thenable(Rc<dyn Thenable>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Smi(n) => f.debug_tuple("Smi").field(n).finish(),
            Value::Double(n) => f.debug_tuple("Double").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Thenable(_) => write!(f, "Thenable(...)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Smi(a), Value::Smi(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Thenable(a), Value::Thenable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Returns whether this value exposes a callable `then`.
    ///
    /// This is the duck-typed probe consumers use to distinguish plain
    /// values from thenables without going through full assimilation. A
    /// capability read that fails answers `false`; the probe never
    /// propagates errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert!(!Value::Smi(42).is_thenable());
    /// assert!(!Value::Null.is_thenable());
    /// ```
    pub fn is_thenable(&self) -> bool {
        match self {
            Value::Thenable(object) => object.then_capability().unwrap_or(false),
            _ => false,
        }
    }

    /// Returns the wrapped thenable object, if any.
    ///
    /// Unlike [`Value::is_thenable`] this does not read the `then`
    /// capability; it only unwraps the object variant. Assimilation reads
    /// the capability itself so a failing read can become a rejection.
    pub fn as_thenable(&self) -> Option<&Rc<dyn Thenable>> {
        match self {
            Value::Thenable(object) => Some(object),
            _ => None,
        }
    }
}

/// Display follows a plain textual rendering of each variant.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// assert_eq!(Value::Undefined.to_string(), "undefined");
/// assert_eq!(Value::Null.to_string(), "null");
/// assert_eq!(Value::Boolean(true).to_string(), "true");
/// assert_eq!(Value::Smi(42).to_string(), "42");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Smi(n) => write!(f, "{}", n),
            Value::Double(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if n.is_sign_positive() {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Thenable(_) => write!(f, "[thenable]"),
        }
    }
}
