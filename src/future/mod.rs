//! The polling contract and the combinator algebra.
//!
//! Everything the executor runs implements [`Future`]: one `poll` function
//! that advances the computation by a single non-blocking step and reports
//! one of three outcomes: completed with a [`Value`], failed with an
//! [`Error`](crate::Error) code, or not ready yet.
//!
//! # Composition
//!
//! Three combinators build composite futures out of two inner ones:
//!
//! * [`then`] runs the inner futures in sequence, feeding the first result
//!   into the second future's input.
//! * [`join`] runs both concurrently and settles once both have settled.
//! * [`select`] runs both concurrently and settles with the first success,
//!   abandoning the loser.
//!
//! Inner futures are shared [`SharedFuture`] references seeded by the
//! caller; the combinators progress each non-settled inner at most once per
//! outer poll and never touch an inner after it has settled. The whole
//! composition is one task: wakers passed down to the leaves re-enqueue the
//! outermost future.
//!
//! ```
//! use std::rc::Rc;
//! use spool::{future, Error, Executor};
//!
//! let mut executor = Executor::new(8).unwrap();
//!
//! // The first contestant loses immediately; the second one wins.
//! let race = future::select(
//!     future::failed(Error::Code(1)),
//!     future::done(Rc::new("fast")),
//! );
//!
//! let task = executor.spawn(race);
//! executor.run().unwrap();
//!
//! assert_eq!(task.ok().unwrap().downcast_ref::<&str>(), Some(&"fast"));
//! ```

mod join;
mod select;
mod then;

pub use self::join::Join;
pub use self::select::Select;
pub use self::then::Then;

use crate::error::Error;
use crate::reactor::Reactor;
use crate::waker::Waker;

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Opaque payload passed between futures.
///
/// Combinators move values from one future to the next without inspecting
/// them; callers downcast at the edges.
pub type Value = Rc<dyn Any>;

/// A future shared between its owner (executor or combinator) and the
/// caller that built it.
pub type SharedFuture = Rc<RefCell<dyn Future>>;

/// The outcome of a single poll: settled with a value or an error code, or
/// still pending.
pub type Poll = Result<Async, Error>;

/// The non-failing half of a poll outcome.
pub enum Async {
    /// The future settled successfully with a value.
    Ready(Value),
    /// The future cannot make further progress yet. By contract it has
    /// already arranged its own wake-up.
    NotReady,
}

impl Async {
    /// Returns true when the future settled successfully.
    pub fn is_ready(&self) -> bool {
        matches!(*self, Async::Ready(_))
    }
}

impl fmt::Debug for Async {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Async::Ready(_) => write!(fmt, "Ready(..)"),
            Async::NotReady => write!(fmt, "NotReady"),
        }
    }
}

/// A cooperative unit of work, advanced by repeated polling.
///
/// For the rules a `poll` implementation must follow, read the crate level
/// documentation.
pub trait Future {
    /// Advance the state of the future by one non-blocking step.
    ///
    /// `reactor` is where a blocked future registers the descriptor it
    /// waits on; `waker` is the resumption capability for the task this
    /// future is part of. A future must not be polled again after it has
    /// returned `Ready` or an error; owners guard this with their own
    /// bookkeeping.
    fn poll(&mut self, reactor: &mut Reactor, waker: &Waker) -> Poll;

    /// Seed the input consumed on the first poll.
    ///
    /// Called by a parent combinator before the future is first polled.
    /// Futures that take no input ignore it.
    fn set_arg(&mut self, arg: Value) {
        let _ = arg;
    }
}

/// Wrap a future for sharing with a combinator or the executor.
pub fn shared<F: Future + 'static>(future: F) -> SharedFuture {
    Rc::new(RefCell::new(future))
}

/// Chain two futures sequentially; see [`Then`].
pub fn then(first: SharedFuture, second: SharedFuture) -> SharedFuture {
    shared(Then::new(first, second))
}

/// Run two futures concurrently until both settle; see [`Join`].
pub fn join(first: SharedFuture, second: SharedFuture) -> SharedFuture {
    shared(Join::new(first, second))
}

/// Race two futures until the first success; see [`Select`].
pub fn select(first: SharedFuture, second: SharedFuture) -> SharedFuture {
    shared(Select::new(first, second))
}

/// A future immediately ready with `value`.
pub fn done(value: Value) -> SharedFuture {
    shared(Done { value })
}

/// A future that immediately fails with `code`.
pub fn failed(code: Error) -> SharedFuture {
    shared(Failed { code })
}

/// Future returned by [`done`].
pub struct Done {
    value: Value,
}

impl Future for Done {
    fn poll(&mut self, _reactor: &mut Reactor, _waker: &Waker) -> Poll {
        Ok(Async::Ready(self.value.clone()))
    }
}

impl fmt::Debug for Done {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Done").finish()
    }
}

/// Future returned by [`failed`].
#[derive(Debug)]
pub struct Failed {
    code: Error,
}

impl Future for Failed {
    fn poll(&mut self, _reactor: &mut Reactor, _waker: &Waker) -> Poll {
        Err(self.code)
    }
}
