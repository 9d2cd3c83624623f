//! Push-based RESP reply parser.
//!
//! [`parse`] reads exactly one complete reply — nested to any depth — from
//! a [`ByteStream`] and drives a [`ReplyHandler`] through its frames in
//! pre-order. It never reads past the end of the current reply, so the
//! stream is left aligned on the next frame boundary even when the handler
//! bails out partway through.

use memchr::memchr;

use crate::error::{Error, Result};
use crate::reply::ReplyHandler;
use crate::stream::ByteStream;
use crate::{markers, CRLF};

/// Initial peek window for CRLF-terminated lines. No non-bulk line a
/// server normally produces comes close to this.
const INITIAL_LINE_WINDOW: usize = 64;

/// Upper bound on the line window, so a peer cannot force unbounded
/// buffer growth by never sending CRLF.
const MAX_LINE_WINDOW: usize = 64 * 1024;

/// Read one complete reply from `stream`, dispatching its frames to
/// `handler`.
///
/// Returns the first applicable of:
/// - [`Error::StreamError`] — transport failure or truncated reply,
/// - [`Error::IllFormedReply`] — RESP syntax violation,
/// - [`Error::HandlerError`] — a callback returned false (the rest of the
///   reply is still consumed),
/// - [`Error::ErrorReply`] — the reply's top frame was an error line
///   (callbacks still fire; the handler keeps the message),
/// - `Ok(())` otherwise.
pub fn parse(stream: &mut dyn ByteStream, handler: &mut dyn ReplyHandler) -> Result<()> {
    let mut parser = Parser {
        stream,
        handler,
        depth: 0,
        suppressed: false,
        reply_error: false,
        hard: None,
    };
    parser.parse_reply();

    match parser.hard {
        Some(err) => Err(err),
        None if parser.suppressed => Err(Error::HandlerError),
        None if parser.reply_error => Err(Error::ErrorReply),
        None => Ok(()),
    }
}

struct Parser<'a> {
    stream: &'a mut dyn ByteStream,
    handler: &'a mut dyn ReplyHandler,
    depth: usize,
    /// Latched once any callback returns false; all further handler
    /// invocations are skipped while the reply is drained.
    suppressed: bool,
    /// Latched on the first error frame; never overrides a hard error.
    reply_error: bool,
    /// Stream or syntax failure. Set at most once; parsing stops with it.
    hard: Option<Error>,
}

impl Parser<'_> {
    fn fail(&mut self, err: Error) -> bool {
        self.hard = Some(err);
        false
    }

    fn deliver<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut dyn ReplyHandler) -> bool,
    {
        if !self.suppressed && !callback(&mut *self.handler) {
            self.suppressed = true;
        }
    }

    fn parse_reply(&mut self) -> bool {
        let marker = match self.stream.read_byte() {
            Some(byte) => byte,
            None => return self.fail(Error::StreamError),
        };

        let depth = self.depth;
        self.deliver(|h| h.on_enter_reply(depth));
        self.depth += 1;

        let ok = match marker {
            markers::STATUS => self.parse_status(),
            markers::ERROR => self.parse_error(),
            markers::INTEGER => self.parse_integer(),
            markers::BULK => self.parse_bulk(),
            markers::MULTI_BULK => self.parse_multi_bulk(),
            _ => self.fail(Error::IllFormedReply),
        };

        // The bracketing pair holds on every exit path, hard errors
        // included.
        self.depth -= 1;
        let depth = self.depth;
        self.deliver(|h| h.on_leave_reply(depth));
        ok
    }

    fn parse_status(&mut self) -> bool {
        let Some(len) = self.scan_line() else {
            return false;
        };
        let line = match self.stream.peek(len) {
            Some(view) if view.len() == len => view,
            _ => {
                self.hard = Some(Error::StreamError);
                return false;
            }
        };
        if !self.suppressed && !self.handler.on_status(line) {
            self.suppressed = true;
        }
        self.consume_line(len)
    }

    fn parse_error(&mut self) -> bool {
        self.reply_error = true;
        let Some(len) = self.scan_line() else {
            return false;
        };
        let line = match self.stream.peek(len) {
            Some(view) if view.len() == len => view,
            _ => {
                self.hard = Some(Error::StreamError);
                return false;
            }
        };
        if !self.suppressed && !self.handler.on_error(line) {
            self.suppressed = true;
        }
        self.consume_line(len)
    }

    fn parse_integer(&mut self) -> bool {
        let Some(value) = self.read_integer_line() else {
            return false;
        };
        self.deliver(|h| h.on_integer(value));
        true
    }

    fn parse_bulk(&mut self) -> bool {
        let Some(len) = self.read_integer_line() else {
            return false;
        };
        if len < 0 {
            self.deliver(|h| h.on_null());
            return true;
        }
        let Ok(len) = usize::try_from(len) else {
            return self.fail(Error::IllFormedReply);
        };

        let data = match self.stream.read(len) {
            Some(view) if view.len() == len => view,
            _ => {
                self.hard = Some(Error::StreamError);
                return false;
            }
        };
        if !self.suppressed && !self.handler.on_bulk(data) {
            self.suppressed = true;
        }
        self.read_crlf()
    }

    fn parse_multi_bulk(&mut self) -> bool {
        let Some(count) = self.read_integer_line() else {
            return false;
        };
        if count < 0 {
            self.deliver(|h| h.on_null());
            return true;
        }
        let Ok(count) = usize::try_from(count) else {
            return self.fail(Error::IllFormedReply);
        };

        self.deliver(|h| h.on_multi_bulk_begin(count));
        for _ in 0..count {
            if !self.parse_reply() {
                return false;
            }
        }
        true
    }

    /// Length of the next CRLF-terminated line, without consuming it.
    ///
    /// Starts with a 64-byte peek window and doubles while the window
    /// comes back full without a terminator, up to [`MAX_LINE_WINDOW`].
    /// A short window without CRLF means the input ended mid-line.
    fn scan_line(&mut self) -> Option<usize> {
        let mut window = INITIAL_LINE_WINDOW;
        loop {
            let full = {
                let view = match self.stream.peek(window) {
                    Some(view) => view,
                    None => {
                        self.hard = Some(Error::StreamError);
                        return None;
                    }
                };
                if let Some(pos) = find_crlf(view) {
                    return Some(pos);
                }
                view.len() == window
            };
            if !full {
                self.hard = Some(Error::StreamError);
                return None;
            }
            if window >= MAX_LINE_WINDOW {
                self.hard = Some(Error::IllFormedReply);
                return None;
            }
            window *= 2;
        }
    }

    /// Parse the next line as a signed decimal (integer reply, bulk
    /// length, multi-bulk count) and consume it.
    fn read_integer_line(&mut self) -> Option<i64> {
        let len = self.scan_line()?;
        let parsed = match self.stream.peek(len) {
            Some(view) if view.len() == len => parse_decimal(view),
            _ => {
                self.hard = Some(Error::StreamError);
                return None;
            }
        };
        let Some(value) = parsed else {
            self.hard = Some(Error::IllFormedReply);
            return None;
        };
        if self.consume_line(len) {
            Some(value)
        } else {
            None
        }
    }

    fn consume_line(&mut self, len: usize) -> bool {
        if self.stream.skip(len) != len {
            return self.fail(Error::StreamError);
        }
        self.read_crlf()
    }

    /// The scan already proved the terminator is there; skip it without
    /// re-validating the bytes.
    fn read_crlf(&mut self) -> bool {
        if self.stream.skip(CRLF.len()) != CRLF.len() {
            return self.fail(Error::StreamError);
        }
        true
    }
}

/// Signed decimal with optional leading `+`/`-`. Accumulates negative so
/// the full i64 range round-trips; rejects empty bodies, non-digits and
/// overflow.
fn parse_decimal(body: &[u8]) -> Option<i64> {
    let (negative, digits) = match body.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, body),
    };
    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return None;
        }
        value = value
            .checked_mul(10)?
            .checked_sub(i64::from(byte - b'0'))?;
    }

    if negative {
        Some(value)
    } else {
        value.checked_neg()
    }
}

/// Position of the next CRLF pair, if any.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    let mut offset = 0;
    while offset < buf.len().saturating_sub(1) {
        match memchr(b'\r', &buf[offset..]) {
            Some(pos) => {
                let abs = offset + pos;
                if abs + 1 < buf.len() && buf[abs + 1] == b'\n' {
                    return Some(abs);
                }
                offset = abs + 1;
            }
            None => return None,
        }
    }
    None
}
