//! Console output abstraction and the shared reporting sink.
//!
//! The `ConsoleIo` trait provides character-level output that can be implemented
//! for any platform (UART, RTT, stdio, etc.). [`Console`] wraps one implementation
//! behind an async mutex so concurrent activities never interleave inside a
//! single output call.

use core::fmt::{self, Write as _};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::error::ControlError;

/// Capacity of one formatted console line.
pub const LINE_CAPACITY: usize = 64;

/// Platform-agnostic console output trait.
///
/// Implementations may buffer internally or write through; `put_char()` and
/// `write_str()` MUST NOT block indefinitely.
pub trait ConsoleIo {
    /// Platform-specific error type
    type Error;

    /// Write character to output.
    fn put_char(&mut self, c: char) -> Result<(), Self::Error>;

    /// Write string to output.
    ///
    /// Default implementation uses `put_char()` repeatedly.
    /// Override for more efficient bulk writes if needed.
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for c in s.chars() {
            self.put_char(c)?;
        }
        Ok(())
    }
}

/// Reporting sink shared by all activities.
///
/// Each [`print`](Console::print) holds the lock for exactly one write. Write
/// failures are logged and swallowed: console output is diagnostic only.
pub struct Console<M: RawMutex, IO: ConsoleIo> {
    io: Mutex<M, IO>,
}

impl<M: RawMutex, IO: ConsoleIo> Console<M, IO> {
    /// Wrap a console implementation.
    pub const fn new(io: IO) -> Self {
        Self { io: Mutex::new(io) }
    }

    /// Write without taking the lock.
    ///
    /// Requires exclusive access, so it can only run before the console is shared
    /// with concurrent activities (e.g. the welcome banner).
    pub fn print_exclusive(&mut self, s: &str) {
        if self.io.get_mut().write_str(s).is_err() {
            warn!("{}", ControlError::ConsoleWrite);
        }
    }

    /// Write one string under the lock.
    pub async fn print(&self, s: &str) {
        let mut io = self.io.lock().await;
        if io.write_str(s).is_err() {
            warn!("{}", ControlError::ConsoleWrite);
        }
    }

    /// Format into a line buffer and write it under the lock.
    ///
    /// Pieces that would overflow [`LINE_CAPACITY`] are dropped.
    pub async fn print_fmt(&self, args: fmt::Arguments<'_>) {
        let line = format_line(args);
        self.print(&line).await;
    }

    /// Exclusive access to the wrapped implementation.
    pub fn io_mut(&mut self) -> &mut IO {
        self.io.get_mut()
    }

    /// Consume the sink and return the wrapped implementation.
    pub fn into_inner(self) -> IO {
        self.io.into_inner()
    }
}

impl<M: RawMutex, IO: ConsoleIo> fmt::Debug for Console<M, IO> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

/// Format `args` into a fixed-capacity line, keeping the pieces that fit.
pub(crate) fn format_line(args: fmt::Arguments<'_>) -> heapless::String<LINE_CAPACITY> {
    let mut line = heapless::String::new();
    if line.write_fmt(args).is_err() {
        debug!("console line truncated");
    }
    line
}
