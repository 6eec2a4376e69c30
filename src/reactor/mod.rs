//! The readiness multiplexer behind the executor.
//!
//! The [`Reactor`] wraps a [`mio::Poll`] instance and a table of descriptor
//! registrations. Leaf futures that cannot make progress register the
//! descriptor they are blocked on together with their [`Waker`]; when the
//! run queue drains, the executor blocks in [`Reactor::poll`], and every
//! fired event invokes the stored waker, re-enqueueing its task.
//!
//! # Registration discipline
//!
//! Registrations are per-descriptor and persist across wake-ups: the
//! reactor never removes one on its own. The owning future unregisters when
//! it settles, or re-registers (replacing the stored waker) when it was
//! woken but is still unsatisfied. Wake-ups may be spurious; a future must
//! drain its descriptor before suspending again so that no readiness
//! transition is missed.
//!
//! [`Waker`]: crate::Waker

mod reactor;

pub use self::reactor::Reactor;

pub use mio::Interest;
