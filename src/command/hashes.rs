//! Hash commands.

use super::{key_cmd, key_value_cmd, key_values_cmd, Command, TypedCommand};
use crate::error::{Error, Result};
use crate::reply::{BooleanReply, BulkReply, IntegerReply, MultiBulkReply};
use crate::stream::ByteStream;
use crate::writer::{format_command, SingleArg};

key_cmd! {
    /// `HGETALL key`.
    HGetAll => "HGETALL", MultiBulkReply;
    /// `HKEYS key`.
    HKeys => "HKEYS", MultiBulkReply;
    /// `HVALS key`.
    HVals => "HVALS", MultiBulkReply;
    /// `HLEN key`.
    HLen => "HLEN", IntegerReply;
}

key_value_cmd! {
    /// `HEXISTS key field`.
    HExists => "HEXISTS", { field: String }, BooleanReply;
    /// `HGET key field`.
    HGet => "HGET", { field: String }, BulkReply;
}

key_values_cmd! {
    /// `HDEL key field [field ...]`.
    HDel => "HDEL", fields, IntegerReply;
    /// `HMGET key field [field ...]`.
    HMGet => "HMGET", fields, MultiBulkReply;
}

/// `HSET key field value`.
#[derive(Debug, Default)]
pub struct HSet<F: SingleArg = String, V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// The hash field, serialized as one bulk element.
    pub field: F,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: BooleanReply,
}

impl<F: SingleArg, V: SingleArg> HSet<F, V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, field: F, value: V) -> Self {
        Self {
            key: key.into(),
            field,
            value,
            reply: BooleanReply::default(),
        }
    }
}

impl<F: SingleArg, V: SingleArg> Command for HSet<F, V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        format_command(out, &("HSET", &self.key, &self.field, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<F: SingleArg, V: SingleArg> TypedCommand for HSet<F, V> {
    type Reply = BooleanReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

/// `HSETNX key field value`.
#[derive(Debug, Default)]
pub struct HSetNx<F: SingleArg = String, V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// The hash field, serialized as one bulk element.
    pub field: F,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: BooleanReply,
}

impl<F: SingleArg, V: SingleArg> HSetNx<F, V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, field: F, value: V) -> Self {
        Self {
            key: key.into(),
            field,
            value,
            reply: BooleanReply::default(),
        }
    }
}

impl<F: SingleArg, V: SingleArg> Command for HSetNx<F, V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        format_command(out, &("HSETNX", &self.key, &self.field, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<F: SingleArg, V: SingleArg> TypedCommand for HSetNx<F, V> {
    type Reply = BooleanReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

/// `HMSET key field value [field value ...]`.
///
/// An empty pair list is refused with
/// [`InvalidCommandFormat`](crate::Error::InvalidCommandFormat) before
/// any byte is written.
#[derive(Debug, Default)]
pub struct HMSet<F: SingleArg = String, V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Field/value pairs in emission order.
    pub field_value_list: Vec<(F, V)>,
    /// The composed reply handler.
    pub reply: BooleanReply,
}

impl<F: SingleArg, V: SingleArg> HMSet<F, V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, field_value_list: Vec<(F, V)>) -> Self {
        Self {
            key: key.into(),
            field_value_list,
            reply: BooleanReply::default(),
        }
    }
}

impl<F: SingleArg, V: SingleArg> Command for HMSet<F, V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        if self.field_value_list.is_empty() {
            return Err(Error::InvalidCommandFormat);
        }
        format_command(out, &("HMSET", &self.key, &self.field_value_list))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<F: SingleArg, V: SingleArg> TypedCommand for HMSet<F, V> {
    type Reply = BooleanReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}
