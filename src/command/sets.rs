//! Set commands.

use super::{key_cmd, key_single_value_cmd, key_values_cmd};
use crate::reply::{BooleanReply, IntegerReply, MultiBulkReply};

key_cmd! {
    /// `SCARD key`.
    SCard => "SCARD", IntegerReply;
    /// `SMEMBERS key`.
    SMembers => "SMEMBERS", MultiBulkReply;
}

key_values_cmd! {
    /// `SADD key member [member ...]`.
    SAdd => "SADD", members, IntegerReply;
    /// `SREM key member [member ...]`.
    SRem => "SREM", members, IntegerReply;
}

key_single_value_cmd! {
    /// `SISMEMBER key member`.
    SIsMember => "SISMEMBER", member, BooleanReply;
}
