//! # respwire
//!
//! A synchronous, client-side codec for the Redis Serialization Protocol
//! (RESP): a trait-driven command writer and a push-based reply parser,
//! both speaking to the transport through one abstract byte-stream
//! interface.
//!
//! The crate deliberately stops at the wire: socket management, pooling,
//! clustering, and authentication belong to outer layers. What it does
//! provide:
//!
//! - [`ByteStream`]: the `peek`/`read`/`skip`/`write`/`flush` contract the
//!   codec requires of a transport, with an in-memory implementation
//!   ([`MemoryStream`]) and a blocking TCP one ([`TcpTransport`]).
//! - [`format_command`] and the [`Arg`] trait family: heterogeneous values
//!   (integers, byte strings, pairs, sequences, optional groups, score
//!   intervals) serialized as RESP request frames, with the outer array
//!   arity computed in a single pass and no intermediate representation.
//! - [`parse`]: a streaming reply decoder that drives a [`ReplyHandler`]
//!   visitor through one complete (possibly nested) reply, handles partial
//!   input, and never reads past the end of the current reply.
//! - A command catalog ([`command`]) and a [`Session`] that composes
//!   request writing, flushing, and reply parsing into one round trip.
//!
//! ## Example
//!
//! ```
//! use respwire::command::strings::Get;
//! use respwire::{MemoryStream, Session};
//!
//! let mut stream = MemoryStream::new();
//! stream.feed(b"$5\r\nvalue\r\n");
//!
//! let mut session = Session::new(stream);
//! let mut cmd = Get::new("key");
//! session.request(&mut cmd).unwrap();
//! assert_eq!(cmd.reply.result.as_deref(), Some(&b"value"[..]));
//! ```

#![warn(
    clippy::all,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod command;
pub mod error;
pub mod parser;
pub mod reply;
pub mod session;
pub mod stream;
pub mod writer;

pub use command::{adhoc_command, key_command, Command, TypedCommand};
pub use error::{Error, Result};
pub use parser::parse;
pub use reply::{
    BooleanReply, BulkReply, IntegerReply, MultiBulkReply, RankReply, Reply, ReplyBuilder,
    ReplyHandler, StatusReply,
};
pub use session::Session;
pub use stream::{ByteStream, ConnectOpts, MemoryStream, TcpTransport};
pub use writer::{
    format_command, optional, write_bulk, write_header, Arg, Blob, FixedArg, Interval, Opt,
    SingleArg, Wide,
};

/// CRLF terminator bytes.
pub const CRLF: &[u8] = b"\r\n";

/// Type markers for RESP reply frames.
pub mod markers {
    /// Status line: +
    pub const STATUS: u8 = b'+';
    /// Error line: -
    pub const ERROR: u8 = b'-';
    /// Integer: :
    pub const INTEGER: u8 = b':';
    /// Bulk string: $
    pub const BULK: u8 = b'$';
    /// Multi-bulk array: *
    pub const MULTI_BULK: u8 = b'*';
}
