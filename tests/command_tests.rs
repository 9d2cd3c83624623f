//! Command catalog tests: wire-exact request frames, precondition
//! failures, routing keys, and subscriber markers.

use bytes::Bytes;
use respwire::command::hashes::{HMSet, HSet};
use respwire::command::keys::{Del, Expire};
use respwire::command::lists::{LInsert, LPush};
use respwire::command::pubsub::{Publish, Subscribe, Unsubscribe};
use respwire::command::sets::SAdd;
use respwire::command::sorted_sets::{ZAdd, ZCount, ZRange, ZRangeByScore};
use respwire::command::strings::{Get, GetRange, PSetEx, Set, SetEx};
use respwire::{format_command, key_command, Command, Error, Interval, MemoryStream};

fn wire(cmd: &dyn Command) -> Vec<u8> {
    let mut out = MemoryStream::new();
    cmd.write_command(&mut out).unwrap();
    out.output().to_vec()
}

fn expect_invalid(cmd: &dyn Command) {
    let mut out = MemoryStream::new();
    assert_eq!(
        cmd.write_command(&mut out).unwrap_err(),
        Error::InvalidCommandFormat
    );
    assert_eq!(out.output(), b"", "precondition failure must emit nothing");
}

#[test]
fn test_get() {
    let cmd = Get::new("this_is_key");
    assert_eq!(wire(&cmd), b"*2\r\n$3\r\nGET\r\n$11\r\nthis_is_key\r\n");
}

#[test]
fn test_set_value_types() {
    let cmd = Set::new("this_is_key", 10);
    assert_eq!(
        wire(&cmd),
        b"*3\r\n$3\r\nSET\r\n$11\r\nthis_is_key\r\n$2\r\n10\r\n"
    );

    let cmd = Set::new("this_is_key", String::from("this_is_value"));
    assert_eq!(
        wire(&cmd),
        b"*3\r\n$3\r\nSET\r\n$11\r\nthis_is_key\r\n$13\r\nthis_is_value\r\n"
    );

    let cmd = Set::new("this_is_key", "this_is_value");
    assert_eq!(
        wire(&cmd),
        b"*3\r\n$3\r\nSET\r\n$11\r\nthis_is_key\r\n$13\r\nthis_is_value\r\n"
    );

    let cmd = Set::new("this_is_key", Bytes::from_static(b"this_is_value"));
    assert_eq!(
        wire(&cmd),
        b"*3\r\n$3\r\nSET\r\n$11\r\nthis_is_key\r\n$13\r\nthis_is_value\r\n"
    );
}

#[test]
fn test_expire() {
    let cmd = Expire::new("this_is_key", 1000);
    assert_eq!(
        wire(&cmd),
        b"*3\r\n$6\r\nEXPIRE\r\n$11\r\nthis_is_key\r\n$4\r\n1000\r\n"
    );
}

#[test]
fn test_setex_family() {
    let cmd = SetEx::new("key", 1000, 100);
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$5\r\nSETEX\r\n$3\r\nkey\r\n$4\r\n1000\r\n$3\r\n100\r\n"
    );

    let cmd = PSetEx::new("key", 10000, "data");
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$6\r\nPSETEX\r\n$3\r\nkey\r\n$5\r\n10000\r\n$4\r\ndata\r\n"
    );

    let cmd = GetRange::new("key", 0, -1);
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$8\r\nGETRANGE\r\n$3\r\nkey\r\n$1\r\n0\r\n$2\r\n-1\r\n"
    );
}

#[test]
fn test_lpush_multiple_values() {
    let cmd = LPush::new(
        "this_is_key",
        vec![
            String::from("this_is_value1"),
            String::from("this_is_value2"),
        ],
    );
    assert_eq!(
        wire(&cmd),
        &b"*4\r\n$5\r\nLPUSH\r\n$11\r\nthis_is_key\r\n$14\r\nthis_is_value1\r\n$14\r\nthis_is_value2\r\n"[..]
    );
}

#[test]
fn test_lpush_rejects_empty_values() {
    let cmd: LPush<Vec<String>> = LPush::new("key", vec![]);
    expect_invalid(&cmd);
}

#[test]
fn test_linsert_before_and_after() {
    let cmd = LInsert::new("linsert_key", true, "pivot", "inserted");
    assert_eq!(
        wire(&cmd),
        &b"*5\r\n$7\r\nLINSERT\r\n$11\r\nlinsert_key\r\n$6\r\nBEFORE\r\n$5\r\npivot\r\n$8\r\ninserted\r\n"[..]
    );

    let cmd = LInsert::new("linsert_key", false, "pivot", "inserted");
    assert_eq!(
        wire(&cmd),
        &b"*5\r\n$7\r\nLINSERT\r\n$11\r\nlinsert_key\r\n$5\r\nAFTER\r\n$5\r\npivot\r\n$8\r\ninserted\r\n"[..]
    );
}

#[test]
fn test_hset_and_hmset() {
    let cmd = HSet::new("hash", "field", 7);
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$4\r\nHSET\r\n$4\r\nhash\r\n$5\r\nfield\r\n$1\r\n7\r\n"
    );

    let cmd = HMSet::new("hash", vec![("f1", "v1"), ("f2", "v2")]);
    assert_eq!(
        wire(&cmd),
        &b"*6\r\n$5\r\nHMSET\r\n$4\r\nhash\r\n$2\r\nf1\r\n$2\r\nv1\r\n$2\r\nf2\r\n$2\r\nv2\r\n"[..]
    );

    let empty: HMSet<String, String> = HMSet::new("hash", vec![]);
    expect_invalid(&empty);
}

#[test]
fn test_sadd_rejects_empty_members() {
    let cmd: SAdd<Vec<String>> = SAdd::new("key", vec![]);
    expect_invalid(&cmd);
}

#[test]
fn test_zadd() {
    let cmd = ZAdd::new("zset", vec![(1, "one"), (2, "two")]);
    assert_eq!(
        wire(&cmd),
        &b"*6\r\n$4\r\nZADD\r\n$4\r\nzset\r\n$1\r\n1\r\n$3\r\none\r\n$1\r\n2\r\n$3\r\ntwo\r\n"[..]
    );

    let empty: ZAdd<i64, String> = ZAdd::new("zset", vec![]);
    expect_invalid(&empty);
}

#[test]
fn test_zcount_intervals() {
    let mut cmd = ZCount::new("zset", Interval::Exclusive(10), Interval::Inclusive(20));
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$6\r\nZCOUNT\r\n$4\r\nzset\r\n$3\r\n(10\r\n$2\r\n20\r\n"
    );

    cmd.min = Interval::NegInf;
    cmd.max = Interval::PosInf;
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$6\r\nZCOUNT\r\n$4\r\nzset\r\n$4\r\n-inf\r\n$4\r\n+inf\r\n"
    );
}

#[test]
fn test_zrange_withscores_is_optional() {
    let mut cmd = ZRange::new("zset", 0, -1);
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$6\r\nZRANGE\r\n$4\r\nzset\r\n$1\r\n0\r\n$2\r\n-1\r\n"
    );

    cmd.with_scores = true;
    assert_eq!(
        wire(&cmd),
        &b"*5\r\n$6\r\nZRANGE\r\n$4\r\nzset\r\n$1\r\n0\r\n$2\r\n-1\r\n$10\r\nWITHSCORES\r\n"[..]
    );
}

#[test]
fn test_zrangebyscore_full_form() {
    let mut cmd = ZRangeByScore::new("test_key", Interval::NegInf, Interval::PosInf);
    cmd.with_scores = true;
    cmd.use_limit = true;
    cmd.limit_offset = 10;
    cmd.limit_count = 10;

    assert_eq!(
        wire(&cmd),
        &b"*8\r\n$13\r\nZRANGEBYSCORE\r\n$8\r\ntest_key\r\n$4\r\n-inf\r\n$4\r\n+inf\r\n$10\r\nWITHSCORES\r\n$5\r\nLIMIT\r\n$2\r\n10\r\n$2\r\n10\r\n"[..]
    );
}

#[test]
fn test_cluster_keys() {
    assert_eq!(Get::new("this_is_key").cluster_key(), b"this_is_key");
    assert_eq!(Del::new("k").cluster_key(), b"k");
    assert_eq!(Publish::new("channel", "msg").cluster_key(), b"channel");
    assert_eq!(Subscribe::new("chan").cluster_key(), b"");
}

#[test]
fn test_subscriber_markers() {
    assert!(Subscribe::new("chan").is_subscriber_cmd());
    assert!(Unsubscribe::new("chan").is_subscriber_cmd());
    assert!(!Get::new("key").is_subscriber_cmd());
    assert!(!Publish::new("chan", "msg").is_subscriber_cmd());
}

#[test]
fn test_subscribe_wire_and_preconditions() {
    let cmd = Subscribe::new("updates");
    assert_eq!(wire(&cmd), b"*2\r\n$9\r\nSUBSCRIBE\r\n$7\r\nupdates\r\n");

    let empty: Subscribe<Vec<String>> = Subscribe::new(vec![]);
    expect_invalid(&empty);
}

#[test]
fn test_adhoc_key_command() {
    let key = String::from("test");
    let members = vec![1, 2];
    let cmd = key_command(&key, |out| {
        format_command(out, &("SADD", &key, &members))
    });

    assert_eq!(cmd.cluster_key(), b"test");
    assert_eq!(
        wire(&cmd),
        b"*4\r\n$4\r\nSADD\r\n$4\r\ntest\r\n$1\r\n1\r\n$1\r\n2\r\n"
    );
}
