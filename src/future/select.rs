use crate::error::Error;
use crate::future::{Async, Future, Poll, SharedFuture, Value};
use crate::reactor::Reactor;
use crate::waker::Waker;

use log::trace;
use std::fmt;

/// Where the race currently stands.
enum State {
    /// Neither side has settled.
    Neither,
    FirstWon(Value),
    SecondWon(Value),
    FirstFailed(Error),
    SecondFailed(Error),
    /// Both sides failed; carries the first future's code.
    BothFailed(Error),
}

/// Future for the concurrent disjunction of two futures.
///
/// Polls both inner futures until one completes; the first success settles
/// the composition with its value and the loser is abandoned, never to be
/// polled again, even if it last reported pending. A failed side drops out of the
/// race while the other keeps running. Only when both sides have failed
/// does the composition fail, reporting the first future's error code.
///
/// Abandonment is implicit: any registration the loser still holds stays in
/// the reactor until its owner is dropped, so cancel-sensitive leaves
/// should keep their registrations short-lived.
pub struct Select {
    first: SharedFuture,
    second: SharedFuture,
    state: State,
}

impl Select {
    /// Create the concurrent disjunction of `first` and `second`.
    pub fn new(first: SharedFuture, second: SharedFuture) -> Select {
        Select {
            first,
            second,
            state: State::Neither,
        }
    }
}

impl Future for Select {
    fn poll(&mut self, reactor: &mut Reactor, waker: &Waker) -> Poll {
        // Already settled: republish the outcome.
        match self.state {
            State::FirstWon(ref value) | State::SecondWon(ref value) => {
                return Ok(Async::Ready(value.clone()));
            }
            State::BothFailed(code) => return Err(code),
            _ => {}
        }

        // The first side runs unless it already failed.
        if matches!(self.state, State::Neither | State::SecondFailed(_)) {
            match self.first.borrow_mut().poll(reactor, waker) {
                Ok(Async::NotReady) => {}
                Ok(Async::Ready(value)) => {
                    trace!("race won by first future");
                    self.state = State::FirstWon(value.clone());
                    return Ok(Async::Ready(value));
                }
                Err(code) => {
                    if matches!(self.state, State::SecondFailed(_)) {
                        // The race is lost; settle on the next cycle.
                        self.state = State::BothFailed(code);
                        waker.wake();
                    } else {
                        self.state = State::FirstFailed(code);
                    }
                }
            }
        }

        // The second side runs unless it already failed or the race was
        // just lost.
        if matches!(self.state, State::Neither | State::FirstFailed(_)) {
            match self.second.borrow_mut().poll(reactor, waker) {
                Ok(Async::NotReady) => {}
                Ok(Async::Ready(value)) => {
                    trace!("race won by second future");
                    self.state = State::SecondWon(value.clone());
                    return Ok(Async::Ready(value));
                }
                Err(code) => {
                    if let State::FirstFailed(first_code) = self.state {
                        self.state = State::BothFailed(first_code);
                        waker.wake();
                    } else {
                        self.state = State::SecondFailed(code);
                    }
                }
            }
        }

        // A side may have failed, but the survivor can still win.
        Ok(Async::NotReady)
    }
}

impl fmt::Debug for Select {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Select").field("state", &self.state).finish()
    }
}

impl fmt::Debug for State {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            State::Neither => write!(fmt, "Neither"),
            State::FirstWon(_) => write!(fmt, "FirstWon(..)"),
            State::SecondWon(_) => write!(fmt, "SecondWon(..)"),
            State::FirstFailed(code) => write!(fmt, "FirstFailed({:?})", code),
            State::SecondFailed(code) => write!(fmt, "SecondFailed({:?})", code),
            State::BothFailed(code) => write!(fmt, "BothFailed({:?})", code),
        }
    }
}
