//! Command structures.
//!
//! A command knows how to emit its own request frame, which key it hashes
//! on for cluster routing (empty for keyless commands), and whether it is
//! a pub/sub subscription-mode command. Catalog commands also compose
//! exactly one reply handler, so a round trip needs nothing but the
//! command value itself.
//!
//! The catalog is mechanical; the macros below generate the recurring
//! families (plain key commands, key + fixed fields, key + value list,
//! key + single value) and the irregular commands are written out in
//! their family modules.

pub mod hashes;
pub mod keys;
pub mod lists;
pub mod pubsub;
pub mod sets;
pub mod sorted_sets;
pub mod strings;

use crate::error::Result;
use crate::reply::ReplyHandler;
use crate::stream::ByteStream;

/// A value that can be issued as a request.
pub trait Command {
    /// Emit the complete request frame for this command.
    ///
    /// Fails with [`InvalidCommandFormat`](crate::Error::InvalidCommandFormat)
    /// — before any byte is written — when the command's own preconditions
    /// do not hold, or [`StreamError`](crate::Error::StreamError) on a
    /// failed write.
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()>;

    /// The key this command hashes on for cluster routing. The view
    /// aliases the command's own key field; empty for keyless commands.
    fn cluster_key(&self) -> &[u8] {
        &[]
    }

    /// Whether this is a pub/sub subscription-mode command.
    fn is_subscriber_cmd(&self) -> bool {
        false
    }
}

/// A command that carries its reply handler by composition.
pub trait TypedCommand: Command {
    /// The composed handler type.
    type Reply: ReplyHandler;

    /// The materialized reply.
    fn reply(&self) -> &Self::Reply;

    /// The handler to drive while parsing the reply.
    fn reply_mut(&mut self) -> &mut Self::Reply;
}

/// Ad-hoc command bound to a cluster key; see [`key_command`].
pub struct KeyCommand<F> {
    key: String,
    write: F,
}

impl<F> Command for KeyCommand<F>
where
    F: Fn(&mut dyn ByteStream) -> Result<()>,
{
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        (self.write)(out)
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

/// Wrap a writing closure as a command routed by `key`.
///
/// ```
/// use respwire::{format_command, key_command, Command, MemoryStream};
///
/// let key = String::from("test");
/// let cmd = key_command(&key, |out| format_command(out, &("DEL", &key)));
/// let mut out = MemoryStream::new();
/// cmd.write_command(&mut out).unwrap();
/// assert_eq!(out.output(), b"*2\r\n$3\r\nDEL\r\n$4\r\ntest\r\n");
/// ```
pub fn key_command<F>(key: impl Into<String>, write: F) -> KeyCommand<F>
where
    F: Fn(&mut dyn ByteStream) -> Result<()>,
{
    KeyCommand {
        key: key.into(),
        write,
    }
}

/// Keyless ad-hoc command; see [`adhoc_command`].
pub struct AdhocCommand<F> {
    write: F,
}

impl<F> Command for AdhocCommand<F>
where
    F: Fn(&mut dyn ByteStream) -> Result<()>,
{
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        (self.write)(out)
    }
}

/// Wrap a writing closure as a keyless command (empty cluster key).
pub fn adhoc_command<F>(write: F) -> AdhocCommand<F>
where
    F: Fn(&mut dyn ByteStream) -> Result<()>,
{
    AdhocCommand { write }
}

/// Commands of the shape `CMD key`.
macro_rules! key_cmd {
    ($($(#[$meta:meta])* $name:ident => $wire:literal, $reply:ty;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            /// The key the command operates on.
            pub key: String,
            /// The composed reply handler.
            pub reply: $reply,
        }

        impl $name {
            /// Build the command for `key`.
            pub fn new(key: impl Into<String>) -> Self {
                Self {
                    key: key.into(),
                    reply: <$reply>::default(),
                }
            }
        }

        impl crate::command::Command for $name {
            fn write_command(
                &self,
                out: &mut dyn crate::stream::ByteStream,
            ) -> crate::error::Result<()> {
                crate::writer::format_command(out, &($wire, &self.key))
            }

            fn cluster_key(&self) -> &[u8] {
                self.key.as_bytes()
            }
        }

        impl crate::command::TypedCommand for $name {
            type Reply = $reply;

            fn reply(&self) -> &Self::Reply {
                &self.reply
            }

            fn reply_mut(&mut self) -> &mut Self::Reply {
                &mut self.reply
            }
        }
    )+};
}

/// Commands of the shape `CMD key f1 [f2 ...]` with fixed-type fields.
macro_rules! key_value_cmd {
    ($($(#[$meta:meta])* $name:ident => $wire:literal, { $($field:ident: $field_ty:ty),+ }, $reply:ty;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            /// The key the command operates on.
            pub key: String,
            $(pub $field: $field_ty,)+
            /// The composed reply handler.
            pub reply: $reply,
        }

        impl $name {
            /// Build the command from its fields.
            pub fn new(key: impl Into<String>, $($field: $field_ty),+) -> Self {
                Self {
                    key: key.into(),
                    $($field,)+
                    reply: <$reply>::default(),
                }
            }
        }

        impl crate::command::Command for $name {
            fn write_command(
                &self,
                out: &mut dyn crate::stream::ByteStream,
            ) -> crate::error::Result<()> {
                crate::writer::format_command(out, &($wire, &self.key $(, &self.$field)+))
            }

            fn cluster_key(&self) -> &[u8] {
                self.key.as_bytes()
            }
        }

        impl crate::command::TypedCommand for $name {
            type Reply = $reply;

            fn reply(&self) -> &Self::Reply {
                &self.reply
            }

            fn reply_mut(&mut self) -> &mut Self::Reply {
                &mut self.reply
            }
        }
    )+};
}

/// Commands of the shape `CMD key v1 [v2 ...]` over a generic value whose
/// arity is counted at run time; an empty value is refused before any
/// byte is written.
macro_rules! key_values_cmd {
    ($($(#[$meta:meta])* $name:ident => $wire:literal, $field:ident, $reply:ty;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name<V: crate::writer::Arg = Vec<String>> {
            /// The key the command operates on.
            pub key: String,
            /// The values; must contribute at least one bulk element.
            pub $field: V,
            /// The composed reply handler.
            pub reply: $reply,
        }

        impl<V: crate::writer::Arg> $name<V> {
            /// Build the command from its fields.
            pub fn new(key: impl Into<String>, $field: V) -> Self {
                Self {
                    key: key.into(),
                    $field,
                    reply: <$reply>::default(),
                }
            }
        }

        impl<V: crate::writer::Arg> crate::command::Command for $name<V> {
            fn write_command(
                &self,
                out: &mut dyn crate::stream::ByteStream,
            ) -> crate::error::Result<()> {
                if crate::writer::Arg::arity(&self.$field) == 0 {
                    return Err(crate::error::Error::InvalidCommandFormat);
                }
                crate::writer::format_command(out, &($wire, &self.key, &self.$field))
            }

            fn cluster_key(&self) -> &[u8] {
                self.key.as_bytes()
            }
        }

        impl<V: crate::writer::Arg> crate::command::TypedCommand for $name<V> {
            type Reply = $reply;

            fn reply(&self) -> &Self::Reply {
                &self.reply
            }

            fn reply_mut(&mut self) -> &mut Self::Reply {
                &mut self.reply
            }
        }
    )+};
}

/// Commands of the shape `CMD key value` whose value must serialize as
/// exactly one bulk element.
macro_rules! key_single_value_cmd {
    ($($(#[$meta:meta])* $name:ident => $wire:literal, $field:ident, $reply:ty;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name<V: crate::writer::SingleArg = String> {
            /// The key the command operates on.
            pub key: String,
            /// The value, serialized as one bulk element.
            pub $field: V,
            /// The composed reply handler.
            pub reply: $reply,
        }

        impl<V: crate::writer::SingleArg> $name<V> {
            /// Build the command from its fields.
            pub fn new(key: impl Into<String>, $field: V) -> Self {
                Self {
                    key: key.into(),
                    $field,
                    reply: <$reply>::default(),
                }
            }
        }

        impl<V: crate::writer::SingleArg> crate::command::Command for $name<V> {
            fn write_command(
                &self,
                out: &mut dyn crate::stream::ByteStream,
            ) -> crate::error::Result<()> {
                crate::writer::format_command(out, &($wire, &self.key, &self.$field))
            }

            fn cluster_key(&self) -> &[u8] {
                self.key.as_bytes()
            }
        }

        impl<V: crate::writer::SingleArg> crate::command::TypedCommand for $name<V> {
            type Reply = $reply;

            fn reply(&self) -> &Self::Reply {
                &self.reply
            }

            fn reply_mut(&mut self) -> &mut Self::Reply {
                &mut self.reply
            }
        }
    )+};
}

pub(crate) use {key_cmd, key_single_value_cmd, key_value_cmd, key_values_cmd};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;
    use crate::writer::{format_command, optional};

    #[test]
    fn test_key_command_routes_on_key() {
        let key = String::from("test");
        let members = vec![1, 2];
        let cmd = key_command(&key, |out| {
            format_command(out, &("SADD", &key, optional(true, &members)))
        });

        assert_eq!(cmd.cluster_key(), b"test");
        assert!(!cmd.is_subscriber_cmd());

        let mut out = MemoryStream::new();
        cmd.write_command(&mut out).unwrap();
        assert_eq!(
            out.output(),
            b"*4\r\n$4\r\nSADD\r\n$4\r\ntest\r\n$1\r\n1\r\n$1\r\n2\r\n"
        );
    }

    #[test]
    fn test_adhoc_command_is_keyless() {
        let cmd = adhoc_command(|out| format_command(out, &"PING"));
        assert_eq!(cmd.cluster_key(), b"");

        let mut out = MemoryStream::new();
        cmd.write_command(&mut out).unwrap();
        assert_eq!(out.output(), b"*1\r\n$4\r\nPING\r\n");
    }
}
