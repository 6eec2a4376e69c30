use crate::waker::Waker;

use log::{debug, trace};
use mio::unix::SourceFd;
use mio::{Events, Interest, Poll, Token};
use slab::Slab;
use std::collections::HashMap;
use std::io;
use std::os::unix::io::RawFd;

// Maximum number of events drained per poll call.
const MAX_EVENTS: usize = 64;

/// One live interest on a descriptor.
#[derive(Debug)]
struct Registration {
    fd: RawFd,
    interest: Interest,
    waker: Waker,
}

/// Schedules task wake-ups based on I/O events.
///
/// Owned by the [`Executor`](crate::Executor); futures reach it through the
/// reference passed to [`Future::poll`](crate::Future::poll). The reactor
/// maps each registered descriptor to the waker of the task waiting on it
/// and routes fired events back through those wakers.
#[derive(Debug)]
pub struct Reactor {
    poll: Poll,
    events: Events,
    // Registrations indexed by the token handed to the OS multiplexer.
    registrations: Slab<Registration>,
    // Descriptor to token lookup for replace and unregister.
    index: HashMap<RawFd, usize>,
}

impl Reactor {
    pub(crate) fn new() -> io::Result<Reactor> {
        debug!("creating reactor");

        Ok(Reactor {
            poll: Poll::new()?,
            events: Events::with_capacity(MAX_EVENTS),
            registrations: Slab::new(),
            index: HashMap::new(),
        })
    }

    /// Register interest in a descriptor, storing the waker to invoke when
    /// the descriptor becomes ready.
    ///
    /// A descriptor has at most one registration: registering it again
    /// replaces both the interest set and the stored waker. On an OS
    /// failure the error is returned and the table is left untouched.
    pub fn register(&mut self, fd: RawFd, interest: Interest, waker: &Waker) -> io::Result<()> {
        if let Some(&key) = self.index.get(&fd) {
            self.poll
                .registry()
                .reregister(&mut SourceFd(&fd), Token(key), interest)?;

            let registration = &mut self.registrations[key];
            registration.interest = interest;
            registration.waker = waker.clone();

            trace!("replaced registration; fd={} interest={:?}", fd, interest);
            return Ok(());
        }

        let entry = self.registrations.vacant_entry();
        let key = entry.key();

        self.poll
            .registry()
            .register(&mut SourceFd(&fd), Token(key), interest)?;

        entry.insert(Registration {
            fd,
            interest,
            waker: waker.clone(),
        });
        self.index.insert(fd, key);

        debug!("registered descriptor; fd={} interest={:?}", fd, interest);
        Ok(())
    }

    /// Remove the registration for a descriptor.
    ///
    /// Fails with `NotFound` if the descriptor is not registered.
    pub fn unregister(&mut self, fd: RawFd) -> io::Result<()> {
        let key = match self.index.get(&fd) {
            Some(&key) => key,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "descriptor not registered",
                ));
            }
        };

        self.poll.registry().deregister(&mut SourceFd(&fd))?;

        self.index.remove(&fd);
        let registration = self.registrations.remove(key);

        debug!(
            "unregistered descriptor; fd={} interest={:?}",
            fd, registration.interest
        );
        Ok(())
    }

    /// Number of live registrations.
    ///
    /// The executor treats a zero count with an empty run queue as
    /// quiescence.
    pub fn registered(&self) -> usize {
        self.registrations.len()
    }

    /// Block until at least one registered descriptor fires, then invoke
    /// the waker of every fired event in the order the OS reports them.
    ///
    /// Returns immediately when nothing is registered. An error from the
    /// underlying multiplexer is fatal to the run and is propagated.
    pub fn poll(&mut self) -> io::Result<()> {
        if self.registrations.is_empty() {
            trace!("poll skipped; no registrations");
            return Ok(());
        }

        trace!("polling; registrations={}", self.registrations.len());

        loop {
            match self.poll.poll(&mut self.events, None) {
                Ok(()) => break,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        for event in self.events.iter() {
            if let Some(registration) = self.registrations.get(event.token().0) {
                trace!(
                    "readiness event; fd={} readable={} writable={}",
                    registration.fd,
                    event.is_readable(),
                    event.is_writable()
                );
                registration.waker.wake();
            }
        }

        Ok(())
    }
}
