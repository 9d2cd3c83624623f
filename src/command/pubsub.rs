//! Pub/sub commands.
//!
//! The subscription commands are subscription-mode: a plain [`Session`]
//! (a non-subscriber session) refuses to issue them. They carry no
//! cluster key and no composed reply handler; driving a subscriber
//! session is an outer-layer concern.
//!
//! [`Session`]: crate::session::Session

use super::{key_single_value_cmd, Command};
use crate::error::{Error, Result};
use crate::reply::IntegerReply;
use crate::stream::ByteStream;
use crate::writer::{format_command, Arg};

macro_rules! subscriber_cmd {
    ($($(#[$meta:meta])* $name:ident => $wire:literal, $field:ident, check: $check:tt;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name<T: Arg = String> {
            /// The channel or pattern operand.
            pub $field: T,
        }

        impl<T: Arg> $name<T> {
            /// Build the command for its operand.
            pub fn new($field: T) -> Self {
                Self { $field }
            }
        }

        impl<T: Arg> Command for $name<T> {
            fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
                subscriber_cmd!(@check $check, self.$field);
                format_command(out, &($wire, &self.$field))
            }

            fn is_subscriber_cmd(&self) -> bool {
                true
            }
        }
    )+};
    (@check required, $value:expr) => {
        if $value.arity() == 0 {
            return Err(Error::InvalidCommandFormat);
        }
    };
    (@check none, $value:expr) => {};
}

subscriber_cmd! {
    /// `SUBSCRIBE channel [channel ...]`; at least one channel required.
    Subscribe => "SUBSCRIBE", channel, check: required;
    /// `UNSUBSCRIBE [channel ...]`.
    Unsubscribe => "UNSUBSCRIBE", channel, check: none;
    /// `PSUBSCRIBE pattern [pattern ...]`; at least one pattern required.
    PSubscribe => "PSUBSCRIBE", pattern, check: required;
    /// `PUNSUBSCRIBE [pattern ...]`.
    PUnsubscribe => "PUNSUBSCRIBE", pattern, check: none;
}

key_single_value_cmd! {
    /// `PUBLISH channel message`. The channel doubles as the cluster key.
    Publish => "PUBLISH", message, IntegerReply;
}
