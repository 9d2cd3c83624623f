//! List commands.

use super::{key_cmd, key_single_value_cmd, key_value_cmd, key_values_cmd, Command, TypedCommand};
use crate::error::Result;
use crate::reply::{BooleanReply, BulkReply, IntegerReply, MultiBulkReply};
use crate::stream::ByteStream;
use crate::writer::{format_command, SingleArg};

key_cmd! {
    /// `LLEN key`.
    LLen => "LLEN", IntegerReply;
    /// `LPOP key`.
    LPop => "LPOP", BulkReply;
    /// `RPOP key`.
    RPop => "RPOP", BulkReply;
}

key_value_cmd! {
    /// `LINDEX key index`.
    LIndex => "LINDEX", { index: i64 }, BulkReply;
    /// `LRANGE key start stop`.
    LRange => "LRANGE", { start: i64, stop: i64 }, MultiBulkReply;
    /// `LTRIM key start stop`.
    LTrim => "LTRIM", { start: i64, stop: i64 }, BooleanReply;
}

key_values_cmd! {
    /// `LPUSH key value [value ...]`.
    LPush => "LPUSH", values, IntegerReply;
    /// `RPUSH key value [value ...]`.
    RPush => "RPUSH", values, IntegerReply;
}

key_single_value_cmd! {
    /// `LPUSHX key value`.
    LPushX => "LPUSHX", value, IntegerReply;
    /// `RPUSHX key value`.
    RPushX => "RPUSHX", value, IntegerReply;
}

/// `LINSERT key BEFORE|AFTER pivot value`.
#[derive(Debug, Default)]
pub struct LInsert<P: SingleArg = String, V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Insert before the pivot instead of after it.
    pub before_pivot: bool,
    /// The pivot element, serialized as one bulk element.
    pub pivot: P,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: IntegerReply,
}

impl<P: SingleArg, V: SingleArg> LInsert<P, V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, before_pivot: bool, pivot: P, value: V) -> Self {
        Self {
            key: key.into(),
            before_pivot,
            pivot,
            value,
            reply: IntegerReply::default(),
        }
    }
}

impl<P: SingleArg, V: SingleArg> Command for LInsert<P, V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        let placement = if self.before_pivot { "BEFORE" } else { "AFTER" };
        format_command(
            out,
            &("LINSERT", &self.key, placement, &self.pivot, &self.value),
        )
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<P: SingleArg, V: SingleArg> TypedCommand for LInsert<P, V> {
    type Reply = IntegerReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

/// `LREM key count value`.
///
/// `count > 0` removes head to tail, `count < 0` tail to head, and
/// `count == 0` removes every element equal to the value.
#[derive(Debug, Default)]
pub struct LRem<V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Removal count and direction.
    pub count: i64,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: IntegerReply,
}

impl<V: SingleArg> LRem<V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, count: i64, value: V) -> Self {
        Self {
            key: key.into(),
            count,
            value,
            reply: IntegerReply::default(),
        }
    }
}

impl<V: SingleArg> Command for LRem<V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        format_command(out, &("LREM", &self.key, self.count, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<V: SingleArg> TypedCommand for LRem<V> {
    type Reply = IntegerReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

/// `LSET key index value`.
#[derive(Debug, Default)]
pub struct LSet<V: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Index of the element to overwrite.
    pub index: i64,
    /// The value, serialized as one bulk element.
    pub value: V,
    /// The composed reply handler.
    pub reply: BooleanReply,
}

impl<V: SingleArg> LSet<V> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, index: i64, value: V) -> Self {
        Self {
            key: key.into(),
            index,
            value,
            reply: BooleanReply::default(),
        }
    }
}

impl<V: SingleArg> Command for LSet<V> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        format_command(out, &("LSET", &self.key, self.index, &self.value))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<V: SingleArg> TypedCommand for LSet<V> {
    type Reply = BooleanReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}
