//! Leaf futures for non-blocking descriptor I/O.
//!
//! These futures perform raw reads and writes on a file descriptor the
//! caller has already switched to non-blocking mode. When the operating
//! system reports `EAGAIN`/`EWOULDBLOCK`, they register the descriptor with
//! the reactor and suspend; the next readiness event resumes them. Both
//! release their registration before settling, so a completed or failed
//! leaf never leaves a stale entry behind.

use crate::error::Error;
use crate::future::{Async, Future, Poll, Value};
use crate::reactor::{Interest, Reactor};
use crate::waker::Waker;

use log::trace;
use std::fmt;
use std::io;
use std::os::unix::io::RawFd;
use std::rc::Rc;

/// Future that reads exactly `count` bytes from a non-blocking descriptor.
///
/// Resolves with an `Rc<Vec<u8>>` holding the bytes in arrival order. End
/// of stream before `count` bytes fails the future with
/// `Error::Io(UnexpectedEof)`.
pub struct ReadFuture {
    fd: RawFd,
    buf: Vec<u8>,
    count: usize,
    registered: bool,
}

impl ReadFuture {
    /// Create a future reading `count` bytes from `fd`.
    pub fn new(fd: RawFd, count: usize) -> ReadFuture {
        ReadFuture {
            fd,
            buf: Vec::with_capacity(count),
            count,
            registered: false,
        }
    }

    fn release(&mut self, reactor: &mut Reactor) -> Result<(), Error> {
        if self.registered {
            self.registered = false;
            reactor.unregister(self.fd).map_err(|e| Error::Io(e.kind()))?;
        }
        Ok(())
    }
}

impl Future for ReadFuture {
    fn poll(&mut self, reactor: &mut Reactor, waker: &Waker) -> Poll {
        while self.buf.len() < self.count {
            let mut chunk = [0u8; 4096];
            let wanted = (self.count - self.buf.len()).min(chunk.len());
            let n = unsafe { libc::read(self.fd, chunk.as_mut_ptr() as *mut _, wanted) };

            if n > 0 {
                self.buf.extend_from_slice(&chunk[..n as usize]);
                continue;
            }

            if n == 0 {
                self.release(reactor)?;
                return Err(Error::Io(io::ErrorKind::UnexpectedEof));
            }

            let err = io::Error::last_os_error();
            match err.kind() {
                io::ErrorKind::Interrupted => continue,
                io::ErrorKind::WouldBlock => {
                    trace!("read would block; fd={} have={}", self.fd, self.buf.len());
                    reactor
                        .register(self.fd, Interest::READABLE, waker)
                        .map_err(|e| Error::Io(e.kind()))?;
                    self.registered = true;
                    return Ok(Async::NotReady);
                }
                kind => {
                    self.release(reactor)?;
                    return Err(Error::Io(kind));
                }
            }
        }

        self.release(reactor)?;

        let data = std::mem::take(&mut self.buf);
        Ok(Async::Ready(Rc::new(data) as Value))
    }
}

impl fmt::Debug for ReadFuture {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("ReadFuture")
            .field("fd", &self.fd)
            .field("have", &self.buf.len())
            .field("count", &self.count)
            .field("registered", &self.registered)
            .finish()
    }
}

/// Future that writes a byte buffer in full to a non-blocking descriptor.
///
/// Resolves with an `Rc<usize>` holding the number of bytes written. The
/// buffer can also be seeded through `set_arg` with an upstream
/// `Rc<Vec<u8>>`, which lets a write chain directly off a read.
pub struct WriteFuture {
    fd: RawFd,
    data: Vec<u8>,
    written: usize,
    registered: bool,
}

impl WriteFuture {
    /// Create a future writing all of `data` to `fd`.
    pub fn new(fd: RawFd, data: Vec<u8>) -> WriteFuture {
        WriteFuture {
            fd,
            data,
            written: 0,
            registered: false,
        }
    }

    fn release(&mut self, reactor: &mut Reactor) -> Result<(), Error> {
        if self.registered {
            self.registered = false;
            reactor.unregister(self.fd).map_err(|e| Error::Io(e.kind()))?;
        }
        Ok(())
    }
}

impl Future for WriteFuture {
    fn poll(&mut self, reactor: &mut Reactor, waker: &Waker) -> Poll {
        while self.written < self.data.len() {
            let rest = &self.data[self.written..];
            let n = unsafe { libc::write(self.fd, rest.as_ptr() as *const _, rest.len()) };

            if n > 0 {
                self.written += n as usize;
                continue;
            }

            if n == 0 {
                self.release(reactor)?;
                return Err(Error::Io(io::ErrorKind::WriteZero));
            }

            let err = io::Error::last_os_error();
            match err.kind() {
                io::ErrorKind::Interrupted => continue,
                io::ErrorKind::WouldBlock => {
                    trace!(
                        "write would block; fd={} written={}",
                        self.fd,
                        self.written
                    );
                    reactor
                        .register(self.fd, Interest::WRITABLE, waker)
                        .map_err(|e| Error::Io(e.kind()))?;
                    self.registered = true;
                    return Ok(Async::NotReady);
                }
                kind => {
                    self.release(reactor)?;
                    return Err(Error::Io(kind));
                }
            }
        }

        self.release(reactor)?;
        Ok(Async::Ready(Rc::new(self.written) as Value))
    }

    fn set_arg(&mut self, arg: Value) {
        if let Some(bytes) = arg.downcast_ref::<Vec<u8>>() {
            self.data = bytes.clone();
            self.written = 0;
        }
    }
}

impl fmt::Debug for WriteFuture {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("WriteFuture")
            .field("fd", &self.fd)
            .field("written", &self.written)
            .field("len", &self.data.len())
            .field("registered", &self.registered)
            .finish()
    }
}
