//! Error types and result alias.
//!
//! Every fallible operation in the crate surfaces one of the closed set of
//! kinds below. Transport-level detail (the `std::io::Error` behind a
//! [`StreamError`](Error::StreamError)) is retained on the stream object
//! itself so the codec error stays a plain value.

use thiserror::Error;

/// Result type alias for respwire operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error category name, qualifying the numeric codes of [`Error::code`].
pub const CATEGORY: &str = "respwire";

/// The closed set of failure kinds surfaced by the codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The peer answered with a RESP error frame. The message text is
    /// captured by the reply handler, not carried here.
    #[error("server answered with an error reply")]
    ErrorReply,

    /// The caller's reply handler rejected the reply shape.
    #[error("reply handler rejected the reply")]
    HandlerError,

    /// A subscription-mode command was issued on a non-subscriber session.
    #[error("subscription command on a non-subscriber session")]
    SubscriberCmd,

    /// A command failed its own format preconditions; nothing was written.
    #[error("command violates its format preconditions")]
    InvalidCommandFormat,

    /// The reply bytes violate RESP syntax.
    #[error("ill-formed reply")]
    IllFormedReply,

    /// A request was issued on a closed stream.
    #[error("stream is not initialized")]
    StreamNotInitialized,

    /// The transport reported failure, or the reply was truncated. The
    /// underlying transport code remains accessible on the stream.
    #[error("stream error")]
    StreamError,
}

impl Error {
    /// Stable numeric value of this kind within the [`CATEGORY`] category.
    pub const fn code(self) -> i32 {
        match self {
            Error::ErrorReply => 1,
            Error::HandlerError => 2,
            Error::SubscriberCmd => 3,
            Error::InvalidCommandFormat => 4,
            Error::IllFormedReply => 5,
            Error::StreamNotInitialized => 6,
            Error::StreamError => 7,
        }
    }
}
