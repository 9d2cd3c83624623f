//! String commands.

use super::{key_cmd, key_single_value_cmd, key_value_cmd, Command, TypedCommand};
use crate::error::{Error, Result};
use crate::reply::{BooleanReply, BulkReply, IntegerReply};
use crate::stream::ByteStream;
use crate::writer::{format_command, Arg, SingleArg};

key_cmd! {
    /// `GET key`.
    Get => "GET", BulkReply;
    /// `STRLEN key`.
    Strlen => "STRLEN", IntegerReply;
}

key_value_cmd! {
    /// `GETRANGE key start end`.
    GetRange => "GETRANGE", { start: i64, end: i64 }, BulkReply;
}

key_single_value_cmd! {
    /// `SET key value`.
    Set => "SET", value, BooleanReply;
    /// `GETSET key value`.
    GetSet => "GETSET", value, BulkReply;
    /// `SETNX key value`.
    SetNx => "SETNX", value, BooleanReply;
}

/// `APPEND key value`. The value's arity is counted at run time; an empty
/// value is refused before any byte is written.
#[derive(Debug, Default)]
pub struct Append<V: Arg = String> {
    /// The key the command operates on.
    pub key: String,
    /// The value appended to the string.
    pub value: V,
    /// The composed reply handler.
    pub reply: IntegerReply,
}

impl<V: Arg> Append<V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
            reply: IntegerReply::default(),
        }
    }
}

impl<V: Arg> Command for Append<V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        if self.value.arity() == 0 {
            return Err(Error::InvalidCommandFormat);
        }
        format_command(out, &("APPEND", &self.key, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<V: Arg> TypedCommand for Append<V> {
    type Reply = IntegerReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

/// `SETEX key seconds value`.
#[derive(Debug, Default)]
pub struct SetEx<V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Expiry in seconds.
    pub time_to_live: i64,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: BooleanReply,
}

impl<V: SingleArg> SetEx<V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, time_to_live: i64, value: V) -> Self {
        Self {
            key: key.into(),
            time_to_live,
            value,
            reply: BooleanReply::default(),
        }
    }
}

impl<V: SingleArg> Command for SetEx<V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        format_command(out, &("SETEX", &self.key, self.time_to_live, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<V: SingleArg> TypedCommand for SetEx<V> {
    type Reply = BooleanReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

/// `PSETEX key milliseconds value`.
#[derive(Debug, Default)]
pub struct PSetEx<V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Expiry in milliseconds.
    pub time_to_live_ms: i64,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: BooleanReply,
}

impl<V: SingleArg> PSetEx<V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, time_to_live_ms: i64, value: V) -> Self {
        Self {
            key: key.into(),
            time_to_live_ms,
            value,
            reply: BooleanReply::default(),
        }
    }
}

impl<V: SingleArg> Command for PSetEx<V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        format_command(out, &("PSETEX", &self.key, self.time_to_live_ms, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<V: SingleArg> TypedCommand for PSetEx<V> {
    type Reply = BooleanReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

/// `SETRANGE key offset value`.
#[derive(Debug, Default)]
pub struct SetRange<V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Byte offset the write starts at.
    pub offset: i64,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: IntegerReply,
}

impl<V: SingleArg> SetRange<V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, offset: i64, value: V) -> Self {
        Self {
            key: key.into(),
            offset,
            value,
            reply: IntegerReply::default(),
        }
    }
}

impl<V: SingleArg> Command for SetRange<V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        format_command(out, &("SETRANGE", &self.key, self.offset, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<V: SingleArg> TypedCommand for SetRange<V> {
    type Reply = IntegerReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}
