//! Unit tests for Future

use core_types::Value;
use deferred::{Future, FutureState, Handler, Settler, TaskQueue};
use std::cell::RefCell;
use std::rc::Rc;

/// Creates a pending future whose settler escapes the setup procedure,
/// the way an asynchronous producer would retain it.
fn pending(queue: &TaskQueue) -> (Future, Settler) {
    let slot = Rc::new(RefCell::new(None));
    let captured = Rc::clone(&slot);
    let future = Future::create(&queue.handle(), move |settler| {
        *captured.borrow_mut() = Some(settler.clone());
        Ok(())
    });
    let settler = slot.borrow_mut().take().expect("setup runs synchronously");
    (future, settler)
}

fn record(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> Option<Handler> {
    let log = Rc::clone(log);
    Some(Handler::new(move |value| {
        log.borrow_mut().push(label);
        Ok(value)
    }))
}

#[test]
fn then_returns_a_new_pending_future() {
    let queue = TaskQueue::new();
    let future = Future::of(&queue.handle(), Value::Smi(1));
    let chained = future.then(None, None);
    assert_eq!(chained.state(), FutureState::Pending);
}

#[test]
fn reaction_is_not_invoked_synchronously_with_registration() {
    let queue = TaskQueue::new();
    let future = Future::of(&queue.handle(), Value::Smi(1));

    let log = Rc::new(RefCell::new(Vec::new()));
    future.then(record(&log, "ran"), None);

    // Registered after settlement, still deferred to a later turn.
    assert!(log.borrow().is_empty());
    queue.run_until_idle().unwrap();
    assert_eq!(*log.borrow(), vec!["ran"]);
}

#[test]
fn reaction_is_not_invoked_synchronously_with_settlement() {
    let queue = TaskQueue::new();
    let (future, settler) = pending(&queue);

    let log = Rc::new(RefCell::new(Vec::new()));
    future.then(record(&log, "ran"), None);

    settler.fulfill(Value::Smi(1));
    assert!(log.borrow().is_empty());

    queue.run_until_idle().unwrap();
    assert_eq!(*log.borrow(), vec!["ran"]);
}

#[test]
fn reactions_fire_in_registration_order() {
    let queue = TaskQueue::new();
    let (future, settler) = pending(&queue);

    let log = Rc::new(RefCell::new(Vec::new()));
    future.then(record(&log, "a"), None);
    future.then(record(&log, "b"), None);

    settler.fulfill(Value::Smi(1));
    queue.run_until_idle().unwrap();
    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn reactions_registered_after_settlement_also_fire_in_order() {
    let queue = TaskQueue::new();
    let future = Future::of(&queue.handle(), Value::Smi(1));

    let log = Rc::new(RefCell::new(Vec::new()));
    future.then(record(&log, "a"), None);
    future.then(record(&log, "b"), None);

    queue.run_until_idle().unwrap();
    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn then_without_handlers_passes_fulfillment_through() {
    let queue = TaskQueue::new();
    let mirrored = Future::of(&queue.handle(), Value::Smi(5)).then(None, None);

    queue.run_until_idle().unwrap();
    assert_eq!(mirrored.state(), FutureState::Fulfilled);
    assert_eq!(mirrored.settled_value(), Some(Value::Smi(5)));
}

#[test]
fn then_without_handlers_passes_rejection_through() {
    let queue = TaskQueue::new();
    let reason = Value::String("err".to_string());
    let mirrored = Future::rejected(&queue.handle(), reason.clone()).then(None, None);

    queue.run_until_idle().unwrap();
    assert_eq!(mirrored.state(), FutureState::Rejected);
    assert_eq!(mirrored.settled_value(), Some(reason));
}

#[test]
fn handler_return_value_fulfills_the_chained_future() {
    let queue = TaskQueue::new();
    let chained = Future::of(&queue.handle(), Value::Smi(20)).then(
        Some(Handler::new(|value| match value {
            Value::Smi(n) => Ok(Value::Smi(n + 1)),
            other => Ok(other),
        })),
        None,
    );

    queue.run_until_idle().unwrap();
    assert_eq!(chained.settled_value(), Some(Value::Smi(21)));
}

#[test]
fn handler_error_rejects_the_chained_future() {
    let queue = TaskQueue::new();
    let chained = Future::of(&queue.handle(), Value::Smi(1)).then(
        Some(Handler::new(|_| Err(Value::String("boom".to_string())))),
        None,
    );

    queue.run_until_idle().unwrap();
    assert_eq!(chained.state(), FutureState::Rejected);
    assert_eq!(
        chained.settled_value(),
        Some(Value::String("boom".to_string()))
    );
}

#[test]
fn rejection_handler_output_is_a_fulfillment() {
    let queue = TaskQueue::new();
    let handled = Future::rejected(&queue.handle(), Value::String("err".to_string())).then(
        None,
        Some(Handler::new(|_| Ok(Value::String("handled".to_string())))),
    );

    queue.run_until_idle().unwrap();
    assert_eq!(handled.state(), FutureState::Fulfilled);
    assert_eq!(
        handled.settled_value(),
        Some(Value::String("handled".to_string()))
    );
}

#[test]
fn handler_returning_a_future_is_adopted() {
    let queue = TaskQueue::new();
    let handle = queue.handle();

    let inner = Future::of(&handle, Value::Smi(99));
    let chained = Future::of(&handle, Value::Smi(0)).then(
        Some(Handler::new(move |_| Ok(Value::from(inner.clone())))),
        None,
    );

    queue.run_until_idle().unwrap();
    assert_eq!(chained.state(), FutureState::Fulfilled);
    assert_eq!(chained.settled_value(), Some(Value::Smi(99)));
}

#[test]
fn rejected_future_returned_by_a_handler_rejects_the_chain() {
    let queue = TaskQueue::new();
    let handle = queue.handle();

    let inner = Future::rejected(&handle, Value::String("inner".to_string()));
    let chained = Future::of(&handle, Value::Smi(0)).then(
        Some(Handler::new(move |_| Ok(Value::from(inner.clone())))),
        None,
    );

    queue.run_until_idle().unwrap();
    assert_eq!(chained.state(), FutureState::Rejected);
    assert_eq!(
        chained.settled_value(),
        Some(Value::String("inner".to_string()))
    );
}

#[test]
fn a_future_that_never_settles_keeps_its_reactions() {
    let queue = TaskQueue::new();
    let (future, _settler) = pending(&queue);

    let log = Rc::new(RefCell::new(Vec::new()));
    future.then(record(&log, "never"), None);

    queue.run_until_idle().unwrap();
    assert!(future.has_pending_reactions());
    assert!(log.borrow().is_empty());
}

#[test]
fn cloned_handles_observe_the_same_settlement() {
    let queue = TaskQueue::new();
    let (future, settler) = pending(&queue);
    let alias = future.clone();

    settler.fulfill(Value::Smi(7));

    assert_eq!(alias.state(), FutureState::Fulfilled);
    assert_eq!(alias.settled_value(), Some(Value::Smi(7)));
}
