//! Parser engine tests: round trips, early exit, ill-formed input, and
//! truncation safety.

use proptest::prelude::*;
use respwire::{
    parse, BulkReply, ByteStream, Error, IntegerReply, MemoryStream, MultiBulkReply, Reply,
    ReplyBuilder, ReplyHandler, StatusReply,
};

fn wire(reply: &Reply) -> Vec<u8> {
    let mut out = MemoryStream::new();
    assert!(reply.serialize(&mut out));
    out.output().to_vec()
}

fn round_trip(reply: Reply) {
    let bytes = wire(&reply);
    let mut stream = MemoryStream::with_input(&bytes);
    let mut builder = ReplyBuilder::new();

    let result = parse(&mut stream, &mut builder);
    if contains_error(&reply) {
        assert_eq!(result.unwrap_err(), Error::ErrorReply);
    } else {
        result.unwrap();
    }
    assert_eq!(builder.root, Some(reply));
    assert_eq!(stream.available(), 0, "parser left bytes behind");
}

fn contains_error(reply: &Reply) -> bool {
    match reply {
        Reply::Error(_) => true,
        Reply::MultiBulk(children) => children.iter().any(contains_error),
        _ => false,
    }
}

#[test]
fn test_status_replies_round_trip() {
    for status in ["OK", "PONG", "QUEUED"] {
        round_trip(Reply::status(status));
    }
}

#[test]
fn test_error_replies_round_trip_with_error_code() {
    for message in [
        "ERR",
        "ERR Operation against a key holding the wrong kind of value",
        "ERR no such key",
        "ERR syntax error",
        "ERR index out of range",
        "LOADING Redis is loading the dataset in memory",
    ] {
        round_trip(Reply::error(message));
    }
}

#[test]
fn test_scalar_replies_round_trip() {
    round_trip(Reply::Integer(0));
    round_trip(Reply::Integer(-12345));
    round_trip(Reply::Integer(i64::MAX));
    round_trip(Reply::bulk("this is bulk reply"));
    round_trip(Reply::bulk(b"\x00\x01\xff binary \r\n safe".to_vec()));
    round_trip(Reply::bulk(""));
}

#[test]
fn test_nil_reply_round_trips() {
    let mut stream = MemoryStream::with_input(b"$-1\r\n");
    let mut builder = ReplyBuilder::new();
    parse(&mut stream, &mut builder).unwrap();
    assert_eq!(builder.root, Some(Reply::Null));
}

#[test]
fn test_flat_multi_bulk_round_trips() {
    round_trip(Reply::multi_bulk(vec![]));
    round_trip(Reply::multi_bulk(vec![
        Reply::bulk("test"),
        Reply::bulk("multi"),
        Reply::bulk("bulk"),
        Reply::bulk("reply"),
        Reply::Null,
    ]));
}

#[test]
fn test_recursive_reply_scenario() {
    let bytes =
        b"*3\r\n$4\r\ntest\r\n:0\r\n*3\r\n:10\r\n*2\r\n$15\r\nrecursive reply\r\n$0\r\n\r\n$-1\r\n";
    let mut stream = MemoryStream::with_input(bytes);
    let mut builder = ReplyBuilder::new();
    parse(&mut stream, &mut builder).unwrap();

    let expected = Reply::multi_bulk(vec![
        Reply::bulk("test"),
        Reply::Integer(0),
        Reply::multi_bulk(vec![
            Reply::Integer(10),
            Reply::multi_bulk(vec![Reply::bulk("recursive reply"), Reply::bulk("")]),
            Reply::Null,
        ]),
    ]);
    assert_eq!(builder.root, Some(expected));
    assert_eq!(stream.available(), 0);
}

/// Accepts integers above 100 and at most three bulks; counts bulk
/// deliveries so early-exit suppression is observable.
#[derive(Default)]
struct Choosy {
    bulk_count: u32,
}

impl ReplyHandler for Choosy {
    fn on_integer(&mut self, value: i64) -> bool {
        value > 100
    }

    fn on_bulk(&mut self, _data: &[u8]) -> bool {
        self.bulk_count += 1;
        self.bulk_count <= 3
    }

    fn on_multi_bulk_begin(&mut self, _count: usize) -> bool {
        true
    }
}

#[test]
fn test_handler_rejection_is_handler_error() {
    let mut handler = Choosy::default();
    let mut stream = MemoryStream::with_input(b":50\r\n");
    assert_eq!(
        parse(&mut stream, &mut handler).unwrap_err(),
        Error::HandlerError
    );

    let mut stream = MemoryStream::with_input(b":150\r\n");
    parse(&mut stream, &mut handler).unwrap();
}

#[test]
fn test_handler_early_exit_stops_callbacks_and_drains_reply() {
    let ten_bulks = Reply::multi_bulk(vec![Reply::bulk("ten bytes!"); 10]);
    let bytes = wire(&ten_bulks);

    let mut handler = Choosy::default();
    let mut stream = MemoryStream::with_input(&bytes);
    assert_eq!(
        parse(&mut stream, &mut handler).unwrap_err(),
        Error::HandlerError
    );
    // The fourth delivery is the one that was rejected; nothing after it
    // was delivered, but the whole reply was consumed.
    assert_eq!(handler.bulk_count, 4);
    assert_eq!(stream.available(), 0);
}

#[test]
fn test_default_handlers_reject_nested_replies() {
    // A reply nested two levels deep; Choosy has no depth override, so
    // the default bracketing rejects depth 2.
    let mut handler = Choosy::default();
    let mut stream = MemoryStream::with_input(b"*1\r\n*1\r\n:200\r\n");
    assert_eq!(
        parse(&mut stream, &mut handler).unwrap_err(),
        Error::HandlerError
    );
    assert_eq!(stream.available(), 0);
}

#[test]
fn test_error_reply_captures_message() {
    let mut handler = IntegerReply::default();
    let mut stream = MemoryStream::with_input(b"-ERR no such key\r\n");
    assert_eq!(
        parse(&mut stream, &mut handler).unwrap_err(),
        Error::ErrorReply
    );
    assert_eq!(handler.error_info.as_deref(), Some("ERR no such key"));
    assert_eq!(handler.result, -1);
}

#[test]
fn test_handler_error_takes_precedence_over_error_reply() {
    // The integer is rejected first; the error frame that follows inside
    // the same reply must not override the handler failure.
    let mut handler = Choosy::default();
    let mut stream = MemoryStream::with_input(b"*2\r\n:50\r\n-ERR later\r\n");
    assert_eq!(
        parse(&mut stream, &mut handler).unwrap_err(),
        Error::HandlerError
    );
    assert_eq!(stream.available(), 0);
}

#[test]
fn test_ill_formed_inputs() {
    for input in [&b":42a\r\n"[..], b"a"] {
        let mut handler = IntegerReply::default();
        let mut stream = MemoryStream::with_input(input);
        assert_eq!(
            parse(&mut stream, &mut handler).unwrap_err(),
            Error::IllFormedReply,
            "input {input:?}"
        );
        assert_eq!(handler.result, -1);
    }
}

#[test]
fn test_truncated_inputs_are_stream_errors() {
    {
        let mut handler = IntegerReply::default();
        let mut stream = MemoryStream::with_input(b":42\r");
        assert_eq!(
            parse(&mut stream, &mut handler).unwrap_err(),
            Error::StreamError
        );
        assert_eq!(handler.result, -1);
    }

    {
        let mut handler = IntegerReply::default();
        let mut stream = MemoryStream::with_input(b":");
        assert_eq!(
            parse(&mut stream, &mut handler).unwrap_err(),
            Error::StreamError
        );
    }

    {
        let mut handler = BulkReply::default();
        let mut stream = MemoryStream::with_input(b"$18\r\nthis is bulk r");
        assert_eq!(
            parse(&mut stream, &mut handler).unwrap_err(),
            Error::StreamError
        );
    }

    {
        // Five elements promised, four present.
        let mut handler = MultiBulkReply::default();
        let mut stream = MemoryStream::with_input(
            b"*5\r\n$4\r\ntest\r\n$5\r\nmulti\r\n$5\r\nreply\r\n$-1\r\n",
        );
        assert_eq!(
            parse(&mut stream, &mut handler).unwrap_err(),
            Error::StreamError
        );
    }
}

#[test]
fn test_truncation_beats_error_reply() {
    let mut handler = StatusReply::default();
    let mut stream = MemoryStream::with_input(b"-ERR truncated");
    assert_eq!(
        parse(&mut stream, &mut handler).unwrap_err(),
        Error::StreamError
    );
}

#[test]
fn test_every_strict_prefix_is_a_stream_error() {
    let full =
        b"*3\r\n$4\r\ntest\r\n:0\r\n*3\r\n:10\r\n*2\r\n$15\r\nrecursive reply\r\n$0\r\n\r\n$-1\r\n";
    for cut in 0..full.len() {
        let mut builder = ReplyBuilder::new();
        let mut stream = MemoryStream::with_input(&full[..cut]);
        assert_eq!(
            parse(&mut stream, &mut builder).unwrap_err(),
            Error::StreamError,
            "prefix of {cut} bytes"
        );
    }
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    let leaf = prop_oneof![
        Just(Reply::Null),
        "[ -~]{0,40}".prop_map(Reply::Status),
        "[ -~]{0,40}".prop_map(Reply::Error),
        any::<i64>().prop_map(Reply::Integer),
        prop::collection::vec(any::<u8>(), 0..200).prop_map(Reply::Bulk),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Reply::MultiBulk)
    })
}

proptest! {
    #[test]
    fn prop_serialize_then_parse_is_identity(reply in arb_reply()) {
        let bytes = wire(&reply);
        let mut stream = MemoryStream::with_input(&bytes);
        let mut builder = ReplyBuilder::new();

        let result = parse(&mut stream, &mut builder);
        if contains_error(&reply) {
            prop_assert_eq!(result.unwrap_err(), Error::ErrorReply);
        } else {
            prop_assert!(result.is_ok());
        }
        prop_assert_eq!(builder.root, Some(reply));
        prop_assert_eq!(stream.available(), 0);
    }

    #[test]
    fn prop_truncated_replies_never_parse(reply in arb_reply(), fraction in 0.0f64..1.0) {
        let bytes = wire(&reply);
        let cut = ((bytes.len() as f64) * fraction) as usize;
        prop_assume!(cut < bytes.len());

        let mut builder = ReplyBuilder::new();
        let mut stream = MemoryStream::with_input(&bytes[..cut]);
        prop_assert_eq!(
            parse(&mut stream, &mut builder).unwrap_err(),
            Error::StreamError
        );
    }
}
