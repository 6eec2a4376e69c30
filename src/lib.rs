//! A single-threaded cooperative task runtime driven by I/O readiness.
//!
//! `spool` schedules lightweight futures on one thread. A future that must
//! wait for a file descriptor suspends, and is resumed once the operating
//! system reports readiness. A small algebra of combinators
//! ([`future::then`], [`future::join`] and [`future::select`]) builds
//! composite computations out of simpler ones.
//!
//! # Futures
//!
//! A future is a small, non-blocking unit of work. It implements a single
//! function: [`Future::poll`]. All work the future needs to get done happens
//! there. It is important that a future never block: blocking a future means
//! blocking the entire executor, including every other future it manages.
//!
//! Each call to `poll` returns one of three outcomes. `Ok(Async::Ready(..))`
//! settles the future with a value, `Err(..)` settles it with an error code,
//! and `Ok(Async::NotReady)` means the future cannot make further progress
//! yet. A settled future is never polled again by its owner.
//!
//! # Waiting
//!
//! A future that returns [`Async::NotReady`] must first arrange its own
//! resumption, either by registering a descriptor with the [`Reactor`] or by
//! handing its [`Waker`] somewhere that will eventually invoke it. When the
//! run queue drains and registrations remain, the executor blocks inside the
//! reactor; fired events route back to wakers, which re-enqueue their tasks
//! in FIFO order.
//!
//! Wake-ups may be spurious. A polled future must re-check its sources and,
//! if still unsatisfied, register again before suspending.
//!
//! # Running
//!
//! ```
//! use std::rc::Rc;
//! use spool::{future, Executor};
//!
//! let mut executor = Executor::new(8).unwrap();
//! let task = executor.spawn(future::done(Rc::new(2i32)));
//!
//! executor.run().unwrap();
//!
//! let value = task.ok().unwrap();
//! assert_eq!(value.downcast_ref::<i32>(), Some(&2));
//! ```
//!
//! [`Executor::run`] returns once the run queue is empty and the reactor has
//! no registrations left: every spawned task has either settled or been
//! abandoned by a [`future::select`] that settled without it.

#![deny(missing_docs, missing_debug_implementations)]

pub mod future;
pub mod io;
pub mod reactor;

mod error;
mod executor;
mod task;
mod waker;

pub use error::Error;
pub use executor::{Executor, Handle};
pub use future::{Async, Future, Poll, SharedFuture, Value};
pub use reactor::Reactor;
pub use task::Task;
pub use waker::Waker;
