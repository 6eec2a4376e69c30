use crate::error::Error;
use crate::future::{Async, Future, Poll, SharedFuture, Value};
use crate::reactor::Reactor;
use crate::waker::Waker;

use std::fmt;

/// Settlement record for one side of a [`Join`].
enum Side {
    Pending,
    Completed(Value),
    Failed(Error),
}

impl Side {
    fn is_pending(&self) -> bool {
        matches!(*self, Side::Pending)
    }
}

/// Future for the concurrent conjunction of two futures.
///
/// Polls both inner futures until both have settled, capturing each
/// outcome as it arrives; a settled inner is never polled again. Completes
/// with the first future's value once both succeed. Failures combine by
/// priority: [`Error::JoinBoth`] when both sides failed, otherwise
/// [`Error::JoinFirst`] or [`Error::JoinSecond`] for the side that did.
pub struct Join {
    first: SharedFuture,
    second: SharedFuture,
    first_state: Side,
    second_state: Side,
}

impl Join {
    /// Create the concurrent conjunction of `first` and `second`.
    pub fn new(first: SharedFuture, second: SharedFuture) -> Join {
        Join {
            first,
            second,
            first_state: Side::Pending,
            second_state: Side::Pending,
        }
    }
}

impl Future for Join {
    fn poll(&mut self, reactor: &mut Reactor, waker: &Waker) -> Poll {
        if self.first_state.is_pending() {
            match self.first.borrow_mut().poll(reactor, waker) {
                Ok(Async::NotReady) => {}
                Ok(Async::Ready(value)) => self.first_state = Side::Completed(value),
                Err(code) => self.first_state = Side::Failed(code),
            }
        }

        if self.second_state.is_pending() {
            match self.second.borrow_mut().poll(reactor, waker) {
                Ok(Async::NotReady) => {}
                Ok(Async::Ready(value)) => self.second_state = Side::Completed(value),
                Err(code) => self.second_state = Side::Failed(code),
            }
        }

        match (&self.first_state, &self.second_state) {
            (Side::Pending, _) | (_, Side::Pending) => Ok(Async::NotReady),
            (Side::Failed(_), Side::Failed(_)) => Err(Error::JoinBoth),
            (Side::Failed(_), _) => Err(Error::JoinFirst),
            (_, Side::Failed(_)) => Err(Error::JoinSecond),
            (Side::Completed(value), Side::Completed(_)) => Ok(Async::Ready(value.clone())),
        }
    }
}

impl fmt::Debug for Join {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Join")
            .field("first", &self.first_state)
            .field("second", &self.second_state)
            .finish()
    }
}

impl fmt::Debug for Side {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Side::Pending => write!(fmt, "Pending"),
            Side::Completed(_) => write!(fmt, "Completed(..)"),
            Side::Failed(code) => write!(fmt, "Failed({:?})", code),
        }
    }
}
