use crate::error::Error;
use crate::future::{Async, Future, Poll, SharedFuture};
use crate::reactor::Reactor;
use crate::waker::Waker;

use log::trace;
use std::fmt;

/// Future for the sequential composition of two futures.
///
/// Runs the first future to completion, seeds the second future's input
/// with its result, then runs the second. A failure of the first future
/// settles the composition with [`Error::ThenFirst`] and the second future
/// is never polled; a failure of the second settles it with
/// [`Error::ThenSecond`].
pub struct Then {
    first: SharedFuture,
    second: SharedFuture,
    first_done: bool,
}

impl Then {
    /// Create the sequential composition of `first` and `second`.
    pub fn new(first: SharedFuture, second: SharedFuture) -> Then {
        Then {
            first,
            second,
            first_done: false,
        }
    }
}

impl Future for Then {
    fn poll(&mut self, reactor: &mut Reactor, waker: &Waker) -> Poll {
        if !self.first_done {
            match self.first.borrow_mut().poll(reactor, waker) {
                Ok(Async::NotReady) => return Ok(Async::NotReady),
                Ok(Async::Ready(value)) => {
                    trace!("sequence head completed; seeding tail");
                    self.first_done = true;
                    self.second.borrow_mut().set_arg(value);
                }
                Err(_) => return Err(Error::ThenFirst),
            }
        }

        match self.second.borrow_mut().poll(reactor, waker) {
            Ok(Async::NotReady) => Ok(Async::NotReady),
            Ok(Async::Ready(value)) => Ok(Async::Ready(value)),
            Err(_) => Err(Error::ThenSecond),
        }
    }
}

impl fmt::Debug for Then {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Then")
            .field("first_done", &self.first_done)
            .finish()
    }
}
