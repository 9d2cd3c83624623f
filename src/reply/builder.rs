//! Owned reply trees.
//!
//! The parser itself never allocates a reply; [`ReplyBuilder`] is the
//! opt-in handler that materializes one complete reply as an owned
//! [`Reply`] tree, children owned by their parent. Round-trip tests lean
//! on it together with [`Reply::serialize`].

use super::ReplyHandler;
use crate::stream::ByteStream;
use crate::writer::{write_bulk, write_decimal};
use crate::{markers, CRLF};

/// One materialized reply frame.
#[derive(Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nil reply (null bulk or null multi-bulk).
    Null,
    /// Status line.
    Status(String),
    /// Error line.
    Error(String),
    /// Integer reply.
    Integer(i64),
    /// Bulk payload.
    Bulk(Vec<u8>),
    /// Multi-bulk reply; elements may be any variant.
    MultiBulk(Vec<Reply>),
}

impl Reply {
    /// Status frame from text.
    pub fn status(text: impl Into<String>) -> Self {
        Reply::Status(text.into())
    }

    /// Error frame from text.
    pub fn error(text: impl Into<String>) -> Self {
        Reply::Error(text.into())
    }

    /// Bulk frame from bytes.
    pub fn bulk(data: impl Into<Vec<u8>>) -> Self {
        Reply::Bulk(data.into())
    }

    /// Multi-bulk frame from elements.
    pub fn multi_bulk(children: impl Into<Vec<Reply>>) -> Self {
        Reply::MultiBulk(children.into())
    }

    /// Whether this frame is nil.
    pub fn is_null(&self) -> bool {
        matches!(self, Reply::Null)
    }

    /// Write this reply in wire form. Nil encodes as a null bulk.
    pub fn serialize(&self, out: &mut dyn ByteStream) -> bool {
        match self {
            Reply::Null => out.write(b"$-1\r\n"),
            Reply::Status(text) => {
                out.write_byte(markers::STATUS) && out.write(text.as_bytes()) && out.write(CRLF)
            }
            Reply::Error(text) => {
                out.write_byte(markers::ERROR) && out.write(text.as_bytes()) && out.write(CRLF)
            }
            Reply::Integer(value) => {
                out.write_byte(markers::INTEGER) && write_decimal(out, *value) && out.write(CRLF)
            }
            Reply::Bulk(data) => write_bulk(out, data),
            Reply::MultiBulk(children) => {
                out.write_byte(markers::MULTI_BULK)
                    && write_decimal(out, children.len())
                    && out.write(CRLF)
                    && children.iter().all(|child| child.serialize(out))
            }
        }
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Null => write!(f, "Null"),
            Reply::Status(text) => write!(f, "Status({text:?})"),
            Reply::Error(text) => write!(f, "Error({text:?})"),
            Reply::Integer(value) => write!(f, "Integer({value})"),
            Reply::Bulk(data) => match std::str::from_utf8(data) {
                Ok(text) => write!(f, "Bulk({text:?})"),
                Err(_) => write!(f, "Bulk({} bytes)", data.len()),
            },
            Reply::MultiBulk(children) => f.debug_list().entries(children).finish(),
        }
    }
}

/// A multi-bulk frame still collecting its children.
#[derive(Debug)]
struct Pending {
    children: Vec<Reply>,
    opened_at: usize,
}

/// Handler that assembles the full reply tree.
///
/// Unlike the default handlers it accepts unbounded nesting; the current
/// depth is tracked through the bracketing callbacks, and a multi-bulk is
/// attached to its parent when its frame is left.
#[derive(Debug, Default)]
pub struct ReplyBuilder {
    stack: Vec<Pending>,
    depth: usize,
    /// The finished tree; `Some` once the top-level frame completes.
    pub root: Option<Reply>,
}

impl ReplyBuilder {
    /// Fresh builder with no partial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the finished tree, resetting the builder.
    pub fn take_root(&mut self) -> Option<Reply> {
        self.stack.clear();
        self.depth = 0;
        self.root.take()
    }

    fn place(&mut self, reply: Reply) {
        match self.stack.last_mut() {
            Some(pending) => pending.children.push(reply),
            None => self.root = Some(reply),
        }
    }
}

impl ReplyHandler for ReplyBuilder {
    fn on_status(&mut self, data: &[u8]) -> bool {
        self.place(Reply::Status(String::from_utf8_lossy(data).into_owned()));
        true
    }

    fn on_error(&mut self, data: &[u8]) -> bool {
        self.place(Reply::Error(String::from_utf8_lossy(data).into_owned()));
        true
    }

    fn on_integer(&mut self, value: i64) -> bool {
        self.place(Reply::Integer(value));
        true
    }

    fn on_null(&mut self) -> bool {
        self.place(Reply::Null);
        true
    }

    fn on_bulk(&mut self, data: &[u8]) -> bool {
        self.place(Reply::Bulk(data.to_vec()));
        true
    }

    fn on_multi_bulk_begin(&mut self, count: usize) -> bool {
        self.stack.push(Pending {
            children: Vec::with_capacity(count.min(1024)),
            opened_at: self.depth,
        });
        true
    }

    fn on_enter_reply(&mut self, depth: usize) -> bool {
        self.depth = depth;
        true
    }

    fn on_leave_reply(&mut self, depth: usize) -> bool {
        if self.stack.last().is_some_and(|p| p.opened_at == depth) {
            if let Some(pending) = self.stack.pop() {
                self.place(Reply::MultiBulk(pending.children));
            }
        }
        self.depth = depth;
        true
    }
}
