//! Request/response round trips over one owned stream.

use tracing::{debug, warn};

use crate::command::{Command, TypedCommand};
use crate::error::{Error, Result};
use crate::parser::parse;
use crate::reply::ReplyHandler;
use crate::stream::ByteStream;

/// One stream, one request/response round trip at a time.
///
/// Every failed request closes the stream, so a request is atomic from
/// the caller's perspective: it either succeeds and leaves a healthy
/// session, or fails and leaves a closed one that must be explicitly
/// reconnected. A `Session` is a non-subscriber session; it refuses
/// subscription-mode commands.
///
/// Thread model: a session is single-threaded; fan-out is achieved with
/// multiple sessions over distinct streams.
#[derive(Debug)]
pub struct Session<S: ByteStream> {
    stream: S,
}

impl<S: ByteStream> Session<S> {
    /// Wrap a connected stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// The underlying stream.
    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// The underlying stream, mutably.
    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Unwrap the session, returning the stream.
    pub fn into_stream(self) -> S {
        self.stream
    }

    /// Whether the underlying stream is open.
    pub fn is_open(&self) -> bool {
        self.stream.is_open()
    }

    /// Close the underlying stream.
    pub fn close(&mut self) -> bool {
        self.stream.close()
    }

    /// Issue `cmd` and parse the reply into its composed handler.
    pub fn request<C: TypedCommand>(&mut self, cmd: &mut C) -> Result<()> {
        self.send(&*cmd)?;
        self.receive(cmd.reply_mut())
    }

    /// Issue `cmd` and parse the reply into an explicit handler.
    pub fn request_with(&mut self, cmd: &dyn Command, handler: &mut dyn ReplyHandler) -> Result<()> {
        self.send(cmd)?;
        self.receive(handler)
    }

    fn send(&mut self, cmd: &dyn Command) -> Result<()> {
        if !self.stream.is_open() {
            return Err(Error::StreamNotInitialized);
        }
        if cmd.is_subscriber_cmd() {
            return Err(Error::SubscriberCmd);
        }
        if let Err(err) = cmd.write_command(&mut self.stream) {
            return Err(self.close_after(err));
        }
        if !self.stream.flush() {
            return Err(self.close_after(Error::StreamError));
        }
        debug!("request flushed");
        Ok(())
    }

    fn receive(&mut self, handler: &mut dyn ReplyHandler) -> Result<()> {
        match parse(&mut self.stream, handler) {
            Ok(()) => {
                debug!("reply parsed");
                Ok(())
            }
            Err(err) => Err(self.close_after(err)),
        }
    }

    /// Close after a failed step. The step's error is returned unless the
    /// close itself fails, which degrades it to a stream error.
    fn close_after(&mut self, err: Error) -> Error {
        warn!(error = %err, "request failed; closing session");
        if self.stream.close() {
            err
        } else {
            Error::StreamError
        }
    }
}
