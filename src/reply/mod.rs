//! Reply handler contract and the default handlers.
//!
//! The parser is push-based: it never builds a reply tree, it drives a
//! [`ReplyHandler`] through the frames of one reply in pre-order. Every
//! callback returns a bool; false means "this handler cannot accept this
//! reply shape" and terminates delivery (the parse finishes consuming the
//! reply and reports [`HandlerError`](crate::Error::HandlerError)).
//!
//! Data views passed to callbacks are valid only for the duration of the
//! callback; handlers that keep data must copy it, as the handlers in
//! this module do.

mod builder;

pub use builder::{Reply, ReplyBuilder};

/// Visitor driven by the reply parser.
///
/// The default method bodies reproduce the conventional client posture:
/// every data callback rejects, `on_error` accepts so that an error reply
/// can be parsed to completion and reported (implementations should
/// record the message text), and the bracketing callbacks reject nesting
/// deeper than one level, which no non-scripting Redis command produces.
pub trait ReplyHandler {
    /// A status line (`+OK`, `+PONG`, ...).
    fn on_status(&mut self, data: &[u8]) -> bool {
        let _ = data;
        false
    }

    /// An error line. Accepted by default so the parse completes and the
    /// outer return code can report the error reply.
    fn on_error(&mut self, data: &[u8]) -> bool {
        let _ = data;
        true
    }

    /// A signed 64-bit integer reply.
    fn on_integer(&mut self, value: i64) -> bool {
        let _ = value;
        false
    }

    /// A nil reply (null bulk or null multi-bulk).
    fn on_null(&mut self) -> bool {
        false
    }

    /// A bulk payload of known length.
    fn on_bulk(&mut self, data: &[u8]) -> bool {
        let _ = data;
        false
    }

    /// A multi-bulk header; the next `count` frames are its children.
    fn on_multi_bulk_begin(&mut self, count: usize) -> bool {
        let _ = count;
        false
    }

    /// Entering a reply frame at `depth` (0 for the top level).
    fn on_enter_reply(&mut self, depth: usize) -> bool {
        depth <= 1
    }

    /// Leaving the reply frame at `depth`; fires on every exit path.
    fn on_leave_reply(&mut self, depth: usize) -> bool {
        depth <= 1
    }
}

fn copy_text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

/// Accepts a status line and keeps its text.
#[derive(Debug, Default)]
pub struct StatusReply {
    /// The status text (`OK`, `PONG`, `QUEUED`, ...).
    pub status: String,
    /// Error-reply text, when the peer answered with an error.
    pub error_info: Option<String>,
}

impl ReplyHandler for StatusReply {
    fn on_status(&mut self, data: &[u8]) -> bool {
        self.status = copy_text(data);
        true
    }

    fn on_error(&mut self, data: &[u8]) -> bool {
        self.error_info = Some(copy_text(data));
        true
    }
}

/// Maps a status to `true` and an integer to `value != 0`.
#[derive(Debug, Default)]
pub struct BooleanReply {
    /// The materialized result.
    pub result: bool,
    /// Error-reply text, when the peer answered with an error.
    pub error_info: Option<String>,
}

impl ReplyHandler for BooleanReply {
    fn on_status(&mut self, _data: &[u8]) -> bool {
        self.result = true;
        true
    }

    fn on_integer(&mut self, value: i64) -> bool {
        self.result = value != 0;
        true
    }

    fn on_error(&mut self, data: &[u8]) -> bool {
        self.error_info = Some(copy_text(data));
        true
    }
}

/// Accepts an integer reply; the result defaults to -1.
#[derive(Debug)]
pub struct IntegerReply {
    /// The materialized result.
    pub result: i64,
    /// Error-reply text, when the peer answered with an error.
    pub error_info: Option<String>,
}

impl Default for IntegerReply {
    fn default() -> Self {
        Self {
            result: -1,
            error_info: None,
        }
    }
}

impl ReplyHandler for IntegerReply {
    fn on_integer(&mut self, value: i64) -> bool {
        self.result = value;
        true
    }

    fn on_error(&mut self, data: &[u8]) -> bool {
        self.error_info = Some(copy_text(data));
        true
    }
}

/// Accepts a bulk reply (copied) or a nil reply (`result` stays `None`).
#[derive(Debug, Default)]
pub struct BulkReply {
    /// The copied payload, or `None` for a nil reply.
    pub result: Option<Vec<u8>>,
    /// Error-reply text, when the peer answered with an error.
    pub error_info: Option<String>,
}

impl ReplyHandler for BulkReply {
    fn on_bulk(&mut self, data: &[u8]) -> bool {
        self.result = Some(data.to_vec());
        true
    }

    fn on_null(&mut self) -> bool {
        true
    }

    fn on_error(&mut self, data: &[u8]) -> bool {
        self.error_info = Some(copy_text(data));
        true
    }
}

/// Accumulates a flat multi-bulk of bulks and nils.
#[derive(Debug, Default)]
pub struct MultiBulkReply {
    /// The elements in reply order; `None` is a nil element.
    pub result: Vec<Option<Vec<u8>>>,
    /// Error-reply text, when the peer answered with an error.
    pub error_info: Option<String>,
}

impl ReplyHandler for MultiBulkReply {
    fn on_multi_bulk_begin(&mut self, count: usize) -> bool {
        // The count is a claim from the wire; don't reserve more than a
        // sane amount before the elements actually arrive.
        self.result.reserve(count.min(1024));
        true
    }

    fn on_bulk(&mut self, data: &[u8]) -> bool {
        self.result.push(Some(data.to_vec()));
        true
    }

    fn on_null(&mut self) -> bool {
        self.result.push(None);
        true
    }

    fn on_error(&mut self, data: &[u8]) -> bool {
        self.error_info = Some(copy_text(data));
        true
    }
}

/// A rank result: an integer, or nil when the member does not exist.
#[derive(Debug)]
pub struct RankReply {
    /// Whether the reply was nil.
    pub is_null: bool,
    /// The rank; meaningful only when `is_null` is false.
    pub result: i64,
    /// Error-reply text, when the peer answered with an error.
    pub error_info: Option<String>,
}

impl Default for RankReply {
    fn default() -> Self {
        Self {
            is_null: false,
            result: -1,
            error_info: None,
        }
    }
}

impl ReplyHandler for RankReply {
    fn on_integer(&mut self, value: i64) -> bool {
        self.result = value;
        true
    }

    fn on_null(&mut self) -> bool {
        self.is_null = true;
        true
    }

    fn on_error(&mut self, data: &[u8]) -> bool {
        self.error_info = Some(copy_text(data));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Defaults;
    impl ReplyHandler for Defaults {}

    #[test]
    fn test_default_posture() {
        let mut handler = Defaults;
        assert!(!handler.on_status(b"OK"));
        assert!(handler.on_error(b"ERR"));
        assert!(!handler.on_integer(1));
        assert!(!handler.on_null());
        assert!(!handler.on_bulk(b"x"));
        assert!(!handler.on_multi_bulk_begin(3));
        assert!(handler.on_enter_reply(0));
        assert!(handler.on_enter_reply(1));
        assert!(!handler.on_enter_reply(2));
        assert!(!handler.on_leave_reply(2));
    }

    #[test]
    fn test_boolean_reply() {
        let mut handler = BooleanReply::default();
        assert!(handler.on_integer(0));
        assert!(!handler.result);
        assert!(handler.on_integer(3));
        assert!(handler.result);
        assert!(handler.on_status(b"OK"));
        assert!(handler.result);
    }

    #[test]
    fn test_bulk_reply_copies() {
        let mut handler = BulkReply::default();
        let transient = b"payload".to_vec();
        assert!(handler.on_bulk(&transient));
        drop(transient);
        assert_eq!(handler.result.as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn test_rank_reply_null() {
        let mut handler = RankReply::default();
        assert!(handler.on_null());
        assert!(handler.is_null);
        assert_eq!(handler.result, -1);
    }
}
