//! Sorted-set commands.

use super::{key_cmd, key_single_value_cmd, key_value_cmd, key_values_cmd, Command, TypedCommand};
use crate::error::{Error, Result};
use crate::reply::{BulkReply, IntegerReply, MultiBulkReply, RankReply};
use crate::stream::ByteStream;
use crate::writer::{format_command, optional, Interval, SingleArg};

key_cmd! {
    /// `ZCARD key`.
    ZCard => "ZCARD", IntegerReply;
}

key_single_value_cmd! {
    /// `ZRANK key member`.
    ZRank => "ZRANK", member, RankReply;
    /// `ZREVRANK key member`.
    ZRevRank => "ZREVRANK", member, RankReply;
    /// `ZSCORE key member`.
    ZScore => "ZSCORE", member, BulkReply;
}

key_values_cmd! {
    /// `ZREM key member [member ...]`.
    ZRem => "ZREM", members, IntegerReply;
}

key_value_cmd! {
    /// `ZCOUNT key min max`.
    ZCount => "ZCOUNT", { min: Interval, max: Interval }, IntegerReply;
    /// `ZREMRANGEBYRANK key start stop`.
    ZRemRangeByRank => "ZREMRANGEBYRANK", { start: i64, stop: i64 }, IntegerReply;
    /// `ZREMRANGEBYSCORE key min max`.
    ZRemRangeByScore => "ZREMRANGEBYSCORE", { min: Interval, max: Interval }, IntegerReply;
}

/// `ZADD key score member [score member ...]`.
///
/// An empty pair list is refused with
/// [`InvalidCommandFormat`](crate::Error::InvalidCommandFormat) before
/// any byte is written.
#[derive(Debug, Default)]
pub struct ZAdd<S: SingleArg = i64, M: SingleArg = String> {
    /// The key the command operates on.
    pub key: String,
    /// Score/member pairs in emission order.
    pub score_member_list: Vec<(S, M)>,
    /// The composed reply handler.
    pub reply: IntegerReply,
}

impl<S: SingleArg, M: SingleArg> ZAdd<S, M> {
    /// Build the command from its fields.
    pub fn new(key: impl Into<String>, score_member_list: Vec<(S, M)>) -> Self {
        Self {
            key: key.into(),
            score_member_list,
            reply: IntegerReply::default(),
        }
    }
}

impl<S: SingleArg, M: SingleArg> Command for ZAdd<S, M> {
    fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
        if self.score_member_list.is_empty() {
            return Err(Error::InvalidCommandFormat);
        }
        format_command(out, &("ZADD", &self.key, &self.score_member_list))
    }

    fn cluster_key(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl<S: SingleArg, M: SingleArg> TypedCommand for ZAdd<S, M> {
    type Reply = IntegerReply;

    fn reply(&self) -> &Self::Reply {
        &self.reply
    }

    fn reply_mut(&mut self) -> &mut Self::Reply {
        &mut self.reply
    }
}

macro_rules! z_range_cmd {
    ($($(#[$meta:meta])* $name:ident => $wire:literal;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            /// The key the command operates on.
            pub key: String,
            /// First rank of the range.
            pub start: i64,
            /// Last rank of the range, inclusive.
            pub stop: i64,
            /// Append `WITHSCORES` so scores interleave with members.
            pub with_scores: bool,
            /// The composed reply handler.
            pub reply: MultiBulkReply,
        }

        impl $name {
            /// Build the command for a rank range.
            pub fn new(key: impl Into<String>, start: i64, stop: i64) -> Self {
                Self {
                    key: key.into(),
                    start,
                    stop,
                    with_scores: false,
                    reply: MultiBulkReply::default(),
                }
            }
        }

        impl Command for $name {
            fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
                format_command(
                    out,
                    &(
                        $wire,
                        &self.key,
                        self.start,
                        self.stop,
                        optional(self.with_scores, "WITHSCORES"),
                    ),
                )
            }

            fn cluster_key(&self) -> &[u8] {
                self.key.as_bytes()
            }
        }

        impl TypedCommand for $name {
            type Reply = MultiBulkReply;

            fn reply(&self) -> &Self::Reply {
                &self.reply
            }

            fn reply_mut(&mut self) -> &mut Self::Reply {
                &mut self.reply
            }
        }
    )+};
}

z_range_cmd! {
    /// `ZRANGE key start stop [WITHSCORES]`.
    ZRange => "ZRANGE";
    /// `ZREVRANGE key start stop [WITHSCORES]`.
    ZRevRange => "ZREVRANGE";
}

macro_rules! z_range_by_score_cmd {
    ($($(#[$meta:meta])* $name:ident => $wire:literal;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            /// The key the command operates on.
            pub key: String,
            /// Lower score bound.
            pub min: Interval,
            /// Upper score bound.
            pub max: Interval,
            /// Append `WITHSCORES` so scores interleave with members.
            pub with_scores: bool,
            /// Append `LIMIT offset count`.
            pub use_limit: bool,
            /// Offset of the `LIMIT` clause.
            pub limit_offset: i64,
            /// Count of the `LIMIT` clause.
            pub limit_count: i64,
            /// The composed reply handler.
            pub reply: MultiBulkReply,
        }

        impl $name {
            /// Build the command for a score range.
            pub fn new(key: impl Into<String>, min: Interval, max: Interval) -> Self {
                Self {
                    key: key.into(),
                    min,
                    max,
                    with_scores: false,
                    use_limit: false,
                    limit_offset: 0,
                    limit_count: 0,
                    reply: MultiBulkReply::default(),
                }
            }
        }

        impl Command for $name {
            fn write_command(&self, out: &mut dyn ByteStream) -> Result<()> {
                format_command(
                    out,
                    &(
                        $wire,
                        &self.key,
                        self.min,
                        self.max,
                        optional(self.with_scores, "WITHSCORES"),
                        optional(self.use_limit, ("LIMIT", self.limit_offset, self.limit_count)),
                    ),
                )
            }

            fn cluster_key(&self) -> &[u8] {
                self.key.as_bytes()
            }
        }

        impl TypedCommand for $name {
            type Reply = MultiBulkReply;

            fn reply(&self) -> &Self::Reply {
                &self.reply
            }

            fn reply_mut(&mut self) -> &mut Self::Reply {
                &mut self.reply
            }
        }
    )+};
}

z_range_by_score_cmd! {
    /// `ZRANGEBYSCORE key min max [WITHSCORES] [LIMIT offset count]`.
    ZRangeByScore => "ZRANGEBYSCORE";
    /// `ZREVRANGEBYSCORE key max min [WITHSCORES] [LIMIT offset count]`.
    ZRevRangeByScore => "ZREVRANGEBYSCORE";
}
