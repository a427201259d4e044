//! Line input for the interactive selection.
//!
//! On Unix, [`PolledLineSource`] waits for the input descriptor with `poll`
//! and reads only once it is readable, one byte at a time up to the newline.
//! When the deadline passes first nothing is read at all, so a line typed
//! later is left for the dev server that inherits the terminal.
//!
//! [`ThreadedLineSource`] works with any [`BufRead`] by reading on a
//! background thread and racing it against the deadline with
//! [`Receiver::recv_timeout`]. Its blocked read cannot be withdrawn, so it is
//! only used for standard input where `poll` is unavailable.

use std::io::{self, BufRead, BufReader, Stdin};
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use tracing::trace;

#[cfg(unix)]
pub use polled::PolledLineSource;

/// Outcome of waiting for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A line was entered; the trailing newline is kept.
    Line(String),
    /// The deadline passed first.
    TimedOut,
    /// The input ended before a line was entered.
    Closed,
}

/// A source of at most one line of user input.
pub trait LineSource {
    /// Waits for the next line, giving up after `timeout` when one is set.
    fn next_line(&mut self, timeout: Option<Duration>) -> io::Result<LineEvent>;
}

/// Line source reading the process's standard input.
#[cfg(unix)]
pub type StdinLineSource = PolledLineSource<std::fs::File>;

#[cfg(not(unix))]
pub type StdinLineSource = ThreadedLineSource<BufReader<Stdin>>;

/// Opens standard input for the selection prompt.
pub fn stdin() -> io::Result<StdinLineSource> {
    #[cfg(unix)]
    {
        PolledLineSource::stdin()
    }
    #[cfg(not(unix))]
    {
        Ok(ThreadedLineSource::stdin())
    }
}

#[cfg(unix)]
mod polled {
    use std::fs::File;
    use std::io::{self, Read};
    use std::os::fd::AsFd;
    use std::time::{Duration, Instant};

    use nix::errno::Errno;
    use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
    use tracing::trace;

    use super::{LineEvent, LineSource};

    /// Reads one line from a file descriptor without ever blocking past the
    /// deadline.
    ///
    /// Bytes are consumed one at a time and only after `poll` reports the
    /// descriptor readable. Nothing after the newline is taken, and a line
    /// still being typed when the deadline passes is abandoned.
    pub struct PolledLineSource<F> {
        input: F,
        finished: bool,
    }

    impl PolledLineSource<File> {
        /// Wraps a duplicate of the standard input descriptor, bypassing the
        /// buffer of [`std::io::Stdin`].
        pub fn stdin() -> io::Result<Self> {
            let fd = io::stdin().as_fd().try_clone_to_owned()?;
            Ok(Self::new(File::from(fd)))
        }
    }

    impl<F> PolledLineSource<F>
    where
        F: AsFd + Read,
    {
        pub fn new(input: F) -> Self {
            Self {
                input,
                finished: false,
            }
        }

        /// Waits until a read would not block. Returns `false` once `deadline`
        /// has passed, without polling again.
        fn wait_readable(&self, deadline: Option<Instant>) -> io::Result<bool> {
            loop {
                let timeout = match deadline {
                    None => PollTimeout::NONE,
                    Some(deadline) => {
                        let now = Instant::now();
                        if now >= deadline {
                            return Ok(false);
                        }
                        poll_timeout(deadline - now)
                    }
                };

                let mut fds = [PollFd::new(self.input.as_fd(), PollFlags::POLLIN)];
                match poll(&mut fds, timeout) {
                    Ok(0) => continue,
                    Ok(_) => return Ok(true),
                    Err(Errno::EINTR) => continue,
                    Err(errno) => return Err(errno.into()),
                }
            }
        }
    }

    /// Whole milliseconds, rounded up so a poll never wakes early. Waits that
    /// do not fit are split across several polls.
    fn poll_timeout(remaining: Duration) -> PollTimeout {
        let millis = remaining.as_micros().div_ceil(1000);
        PollTimeout::from(u16::try_from(millis).unwrap_or(u16::MAX))
    }

    impl<F> LineSource for PolledLineSource<F>
    where
        F: AsFd + Read,
    {
        fn next_line(&mut self, timeout: Option<Duration>) -> io::Result<LineEvent> {
            if self.finished {
                return Ok(LineEvent::Closed);
            }
            self.finished = true;

            let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
            let mut line = Vec::new();
            let mut byte = [0u8; 1];

            loop {
                if !self.wait_readable(deadline)? {
                    if !line.is_empty() {
                        trace!(bytes = line.len(), "abandoning partial line at deadline");
                    }
                    return Ok(LineEvent::TimedOut);
                }

                match self.input.read(&mut byte) {
                    Ok(0) => break,
                    Ok(_) => {
                        line.push(byte[0]);
                        if byte[0] == b'\n' {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }

            if line.is_empty() {
                return Ok(LineEvent::Closed);
            }
            Ok(LineEvent::Line(String::from_utf8_lossy(&line).into_owned()))
        }
    }
}

type LineResult = io::Result<Option<String>>;

/// Reads a single line on a background thread.
///
/// The thread is started on the first call to [`LineSource::next_line`], so
/// constructing the source costs nothing when no prompt is needed. A blocked
/// read cannot be interrupted; once the caller has moved on, the thread is
/// left detached and whatever it reads is discarded.
pub struct ThreadedLineSource<R> {
    reader: Option<R>,
    receiver: Option<Receiver<LineResult>>,
}

impl ThreadedLineSource<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R> ThreadedLineSource<R>
where
    R: BufRead + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            receiver: None,
        }
    }

    fn receiver(&mut self) -> io::Result<&Receiver<LineResult>> {
        if let Some(mut reader) = self.reader.take() {
            let (tx, rx) = channel::bounded(1);
            thread::Builder::new()
                .name("devrun-input".to_string())
                .spawn(move || {
                    let mut line = String::new();
                    let result = match reader.read_line(&mut line) {
                        Ok(0) => Ok(None),
                        Ok(_) => Ok(Some(line)),
                        Err(e) => Err(e),
                    };
                    if tx.send(result).is_err() {
                        trace!("input arrived after selection was resolved, discarding");
                    }
                })?;
            self.receiver = Some(rx);
        }

        self.receiver
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "input reader was not started"))
    }
}

impl<R> LineSource for ThreadedLineSource<R>
where
    R: BufRead + Send + 'static,
{
    fn next_line(&mut self, timeout: Option<Duration>) -> io::Result<LineEvent> {
        let receiver = self.receiver()?;
        let received = match timeout {
            Some(timeout) => match receiver.recv_timeout(timeout) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => return Ok(LineEvent::TimedOut),
                Err(RecvTimeoutError::Disconnected) => return Ok(LineEvent::Closed),
            },
            None => match receiver.recv() {
                Ok(result) => result,
                Err(_) => return Ok(LineEvent::Closed),
            },
        };

        Ok(match received? {
            Some(line) => LineEvent::Line(line),
            None => LineEvent::Closed,
        })
    }
}
