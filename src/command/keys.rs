//! Key-space commands.

use super::{key_cmd, key_value_cmd};
use crate::reply::{BooleanReply, IntegerReply, StatusReply};

key_cmd! {
    /// `DEL key`. Carries a single key so cluster routing stays possible.
    Del => "DEL", IntegerReply;
    /// `EXISTS key`.
    Exists => "EXISTS", BooleanReply;
    /// `PERSIST key`.
    Persist => "PERSIST", BooleanReply;
    /// `TYPE key`.
    Type => "TYPE", StatusReply;
    /// `TTL key`.
    Ttl => "TTL", IntegerReply;
    /// `PTTL key`.
    Pttl => "PTTL", IntegerReply;
}

key_value_cmd! {
    /// `EXPIRE key seconds`.
    Expire => "EXPIRE", { time_to_live: i64 }, BooleanReply;
    /// `PEXPIRE key milliseconds`.
    PExpire => "PEXPIRE", { time_to_live_ms: i64 }, BooleanReply;
    /// `EXPIREAT key timestamp`.
    ExpireAt => "EXPIREAT", { expire_time: i64 }, BooleanReply;
    /// `PEXPIREAT key timestamp-ms`.
    PExpireAt => "PEXPIREAT", { expire_time_ms: i64 }, BooleanReply;
}
