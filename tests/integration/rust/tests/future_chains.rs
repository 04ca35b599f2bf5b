//! Future Chain Integration Tests
//!
//! Drives multi-link chains end to end through the task queue, the way a
//! consumer composing asynchronous pipelines would.

use core_types::Value;
use deferred::{Future, FutureState, Handler, TaskQueue};
use std::cell::RefCell;
use std::rc::Rc;

/// Test: a thrown value travels down the chain into a rejection handler.
#[test]
fn test_exception_propagates_through_the_chain() {
    let queue = TaskQueue::new();

    let settled = Future::create(&queue.handle(), |settler| {
        settler.fulfill(Value::Smi(1));
        Ok(())
    })
    .then(
        Some(Handler::new(|_| Err(Value::String("boom".to_string())))),
        None,
    )
    .then(None, Some(Handler::new(Ok)));

    queue.run_until_idle().unwrap();

    // The rejection handler's output fulfills the final future.
    assert_eq!(settled.state(), FutureState::Fulfilled);
    assert_eq!(
        settled.settled_value(),
        Some(Value::String("boom".to_string()))
    );
}

/// Test: a whole chain settles under one drain of the queue.
#[test]
fn test_three_link_transformation_chain() {
    let queue = TaskQueue::new();

    let add_one = || {
        Some(Handler::new(|value| match value {
            Value::Smi(n) => Ok(Value::Smi(n + 1)),
            other => Ok(other),
        }))
    };

    let result = Future::of(&queue.handle(), Value::Smi(0))
        .then(add_one(), None)
        .then(add_one(), None)
        .then(add_one(), None);

    queue.run_until_idle().unwrap();
    assert_eq!(result.settled_value(), Some(Value::Smi(3)));
}

/// Test: pass-through chaining keeps value and disposition.
#[test]
fn test_pass_through_keeps_the_value() {
    let queue = TaskQueue::new();
    let mirrored = Future::of(&queue.handle(), Value::Smi(5)).then(None, None);

    queue.run_until_idle().unwrap();
    assert_eq!(mirrored.settled_value(), Some(Value::Smi(5)));
}

/// Test: a rejection skips fulfillment handlers until one handles it.
#[test]
fn test_rejection_skips_fulfillment_handlers() {
    let queue = TaskQueue::new();
    let touched = Rc::new(RefCell::new(false));

    let flag = Rc::clone(&touched);
    let settled = Future::rejected(&queue.handle(), Value::String("err".to_string()))
        .then(
            Some(Handler::new(move |value| {
                *flag.borrow_mut() = true;
                Ok(value)
            })),
            None,
        )
        .then(
            None,
            Some(Handler::new(|_| Ok(Value::String("handled".to_string())))),
        );

    queue.run_until_idle().unwrap();

    assert!(!*touched.borrow());
    assert_eq!(settled.state(), FutureState::Fulfilled);
    assert_eq!(
        settled.settled_value(),
        Some(Value::String("handled".to_string()))
    );
}

/// Test: settlement after registration, driven across separate drains.
#[test]
fn test_late_settlement_reaches_earlier_registrations() {
    let queue = TaskQueue::new();

    let slot = Rc::new(RefCell::new(None));
    let captured = Rc::clone(&slot);
    let future = Future::create(&queue.handle(), move |settler| {
        *captured.borrow_mut() = Some(settler.clone());
        Ok(())
    });

    let doubled = future.then(
        Some(Handler::new(|value| match value {
            Value::Smi(n) => Ok(Value::Smi(n * 2)),
            other => Ok(other),
        })),
        None,
    );

    // Nothing to do yet: the source is still pending.
    assert_eq!(queue.run_until_idle().unwrap(), 0);
    assert_eq!(doubled.state(), FutureState::Pending);

    let settler = slot.borrow_mut().take().expect("setup runs synchronously");
    settler.fulfill(Value::Smi(21));

    queue.run_until_idle().unwrap();
    assert_eq!(doubled.settled_value(), Some(Value::Smi(42)));
}
