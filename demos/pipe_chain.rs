//! Runs a read and a write concurrently over a pipe.
//!
//! The reader suspends on the empty pipe and is resumed by the reactor once
//! the writer task has filled it. Run with `RUST_LOG=spool=trace` to watch
//! the scheduler and reactor at work.

use spool::io::{ReadFuture, WriteFuture};
use spool::{future, Executor};

fn main() {
    env_logger::init();

    let (rd, wr) = pipe();

    let mut executor = Executor::new(8).expect("failed to create executor");

    let reader = executor.spawn(future::shared(ReadFuture::new(rd, 5)));
    let writer = executor.spawn(future::shared(WriteFuture::new(wr, b"hello".to_vec())));

    executor.run().expect("executor failed");

    let received = reader.ok().expect("read did not complete");
    let written = writer.ok().expect("write did not complete");

    println!(
        "wrote {} bytes, received {:?}",
        written.downcast_ref::<usize>().unwrap(),
        String::from_utf8_lossy(received.downcast_ref::<Vec<u8>>().unwrap()),
    );

    unsafe {
        libc::close(rd);
        libc::close(wr);
    }
}

/// Create a pipe with both ends switched to non-blocking mode.
fn pipe() -> (i32, i32) {
    let mut fds = [0 as libc::c_int; 2];
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);

    for &fd in &fds {
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        assert!(flags >= 0);
        assert!(unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } >= 0);
    }

    (fds[0], fds[1])
}
