use std::{error, fmt, io};

/// Error code recorded when a future settles in failure.
///
/// Codes introduced by combinators identify which branch of the composition
/// failed; leaf futures report either a domain-specific `Code` or the `Io`
/// kind of an operating system failure. Errors never cross the scheduler as
/// panics; they travel as `Err` results until an owner captures them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The first future of a sequential pair failed; the second never ran.
    ThenFirst,
    /// The second future of a sequential pair failed.
    ThenSecond,
    /// Only the first of two joined futures failed.
    JoinFirst,
    /// Only the second of two joined futures failed.
    JoinSecond,
    /// Both joined futures failed.
    JoinBoth,
    /// Domain-specific failure reported by a leaf future.
    Code(i32),
    /// Operating system failure observed by a leaf future.
    Io(io::ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ThenFirst => write!(fmt, "first future of a sequence failed"),
            Error::ThenSecond => write!(fmt, "second future of a sequence failed"),
            Error::JoinFirst => write!(fmt, "first joined future failed"),
            Error::JoinSecond => write!(fmt, "second joined future failed"),
            Error::JoinBoth => write!(fmt, "both joined futures failed"),
            Error::Code(code) => write!(fmt, "future failed with code {}", code),
            Error::Io(kind) => write!(fmt, "i/o error: {}", kind),
        }
    }
}

impl error::Error for Error {}
