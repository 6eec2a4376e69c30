#![allow(dead_code)]

use spool::future::{self, Async, Future, Poll, SharedFuture, Value};
use spool::reactor::Reactor;
use spool::{Error, Handle, Waker};

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::os::unix::io::RawFd;
use std::rc::Rc;

/// Initialize logging once per test binary.
pub fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One scripted outcome of a `Script` future.
pub enum Step {
    /// Report not-ready after waking the own waker, so the task runs again
    /// on the next cycle.
    Pending,
    /// Complete with the value.
    Done(Value),
    /// Fail with the code.
    Fail(Error),
}

/// Leaf future that plays back a fixed sequence of outcomes.
///
/// Every poll consumes one step and bumps the shared counter. Polling past
/// the end of the script panics, which turns any forbidden extra poll into
/// a test failure.
pub struct Script {
    steps: VecDeque<Step>,
    polls: Rc<Cell<usize>>,
    id: u32,
    log: Option<Rc<RefCell<Vec<u32>>>>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> (SharedFuture, Rc<Cell<usize>>) {
        let polls = Rc::new(Cell::new(0));
        let script = Script {
            steps: steps.into(),
            polls: polls.clone(),
            id: 0,
            log: None,
        };
        (future::shared(script), polls)
    }

    /// Like `new`, but also records `id` into `log` on every poll.
    pub fn recording(
        steps: Vec<Step>,
        id: u32,
        log: Rc<RefCell<Vec<u32>>>,
    ) -> (SharedFuture, Rc<Cell<usize>>) {
        let polls = Rc::new(Cell::new(0));
        let script = Script {
            steps: steps.into(),
            polls: polls.clone(),
            id,
            log: Some(log),
        };
        (future::shared(script), polls)
    }
}

impl Future for Script {
    fn poll(&mut self, _reactor: &mut Reactor, waker: &Waker) -> Poll {
        self.polls.set(self.polls.get() + 1);

        if let Some(ref log) = self.log {
            log.borrow_mut().push(self.id);
        }

        match self.steps.pop_front().expect("script polled past its end") {
            Step::Pending => {
                waker.wake();
                Ok(Async::NotReady)
            }
            Step::Done(value) => Ok(Async::Ready(value)),
            Step::Fail(code) => Err(code),
        }
    }
}

/// Leaf future that completes with the value it was seeded with.
pub struct Echo {
    arg: Option<Value>,
    polls: Rc<Cell<usize>>,
}

impl Echo {
    pub fn new() -> (SharedFuture, Rc<Cell<usize>>) {
        let polls = Rc::new(Cell::new(0));
        let echo = Echo {
            arg: None,
            polls: polls.clone(),
        };
        (future::shared(echo), polls)
    }
}

impl Future for Echo {
    fn poll(&mut self, _reactor: &mut Reactor, _waker: &Waker) -> Poll {
        self.polls.set(self.polls.get() + 1);
        let value = self.arg.take().expect("echo polled without input");
        Ok(Async::Ready(value))
    }

    fn set_arg(&mut self, arg: Value) {
        self.arg = Some(arg);
    }
}

/// Leaf future that spawns another future on first poll, then completes.
pub struct SpawnOnce {
    handle: Handle,
    inner: Option<SharedFuture>,
}

impl SpawnOnce {
    pub fn new(handle: Handle, inner: SharedFuture) -> SharedFuture {
        future::shared(SpawnOnce {
            handle,
            inner: Some(inner),
        })
    }
}

impl Future for SpawnOnce {
    fn poll(&mut self, _reactor: &mut Reactor, _waker: &Waker) -> Poll {
        let inner = self.inner.take().expect("spawned twice");
        self.handle.spawn(inner);
        Ok(Async::Ready(Rc::new(()) as Value))
    }
}

/// Leaf future that closes a descriptor on its first poll, then completes.
pub struct CloseOnce {
    fd: RawFd,
}

impl CloseOnce {
    pub fn new(fd: RawFd) -> SharedFuture {
        future::shared(CloseOnce { fd })
    }
}

impl Future for CloseOnce {
    fn poll(&mut self, _reactor: &mut Reactor, _waker: &Waker) -> Poll {
        close(self.fd);
        Ok(Async::Ready(Rc::new(()) as Value))
    }
}

/// Leaf future that tries to register a bogus descriptor and reports the
/// resulting error.
pub struct RegisterBad {
    fd: RawFd,
}

impl RegisterBad {
    pub fn new(fd: RawFd) -> SharedFuture {
        future::shared(RegisterBad { fd })
    }
}

impl Future for RegisterBad {
    fn poll(&mut self, reactor: &mut Reactor, waker: &Waker) -> Poll {
        match reactor.register(self.fd, spool::reactor::Interest::READABLE, waker) {
            Ok(()) => Ok(Async::Ready(Rc::new(()) as Value)),
            Err(e) => Err(Error::Io(e.kind())),
        }
    }
}

/// Create a pipe with both ends switched to non-blocking mode.
///
/// Returns (read end, write end).
pub fn pipe() -> (RawFd, RawFd) {
    let mut fds = [0 as libc::c_int; 2];
    let res = unsafe { libc::pipe(fds.as_mut_ptr()) };
    assert_eq!(res, 0, "pipe: {}", std::io::Error::last_os_error());

    for &fd in &fds {
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        assert!(flags >= 0, "fcntl: {}", std::io::Error::last_os_error());
        let res = unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) };
        assert!(res >= 0, "fcntl: {}", std::io::Error::last_os_error());
    }

    (fds[0], fds[1])
}

pub fn close(fd: RawFd) {
    unsafe {
        libc::close(fd);
    }
}

/// Write a small buffer to a pipe in one shot.
pub fn write_all(fd: RawFd, data: &[u8]) {
    let n = unsafe { libc::write(fd, data.as_ptr() as *const _, data.len()) };
    assert_eq!(n, data.len() as isize, "short write to test pipe");
}
