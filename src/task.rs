use crate::error::Error;
use crate::future::{Poll, SharedFuture, Value};
use crate::reactor::Reactor;
use crate::waker::Waker;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle to a spawned future.
///
/// A `Task` is what [`Executor::spawn`](crate::Executor::spawn) hands back:
/// a cheaply cloneable view of the future's scheduling state and, once the
/// future settles, of its outcome. The executor keeps its own clone on the
/// run queue; wakers keep another.
#[derive(Clone)]
pub struct Task {
    inner: Rc<Inner>,
}

struct Inner {
    future: SharedFuture,
    // True from spawn until settlement.
    active: Cell<bool>,
    // True while the task sits on the run queue; suppresses duplicate
    // enqueues from repeated wake-ups.
    queued: Cell<bool>,
    outcome: RefCell<Option<Result<Value, Error>>>,
}

impl Task {
    pub(crate) fn new(future: SharedFuture) -> Task {
        Task {
            inner: Rc::new(Inner {
                future,
                active: Cell::new(false),
                queued: Cell::new(false),
                outcome: RefCell::new(None),
            }),
        }
    }

    /// Returns true while the executor considers the task live.
    ///
    /// Set on spawn, cleared when the future settles.
    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// The successful result, available once the task has completed.
    pub fn ok(&self) -> Option<Value> {
        match *self.inner.outcome.borrow() {
            Some(Ok(ref value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// The error code, available once the task has failed.
    pub fn err(&self) -> Option<Error> {
        match *self.inner.outcome.borrow() {
            Some(Err(code)) => Some(code),
            _ => None,
        }
    }

    pub(crate) fn set_active(&self, val: bool) {
        self.inner.active.set(val);
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.inner.outcome.borrow().is_some()
    }

    pub(crate) fn is_queued(&self) -> bool {
        self.inner.queued.get()
    }

    pub(crate) fn set_queued(&self, val: bool) {
        self.inner.queued.set(val);
    }

    pub(crate) fn poll(&self, reactor: &mut Reactor, waker: &Waker) -> Poll {
        self.inner.future.borrow_mut().poll(reactor, waker)
    }

    pub(crate) fn settle(&self, outcome: Result<Value, Error>) {
        self.inner.active.set(false);
        *self.inner.outcome.borrow_mut() = Some(outcome);
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Task")
            .field("active", &self.inner.active.get())
            .field("queued", &self.inner.queued.get())
            .field("settled", &self.is_settled())
            .finish()
    }
}
