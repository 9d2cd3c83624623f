//! Command writer engine.
//!
//! Turns heterogeneous values into RESP request frames: one `*K\r\n`
//! header whose arity is computed in a single pass over the values, then
//! each value serialized as one or more `$len\r\n<bytes>\r\n` bulk
//! elements. No intermediate representation is built; arity computation
//! never serializes.

mod args;

pub use args::{optional, Arg, Blob, FixedArg, Interval, Opt, SingleArg, Wide};

use crate::error::{Error, Result};
use crate::stream::ByteStream;
use crate::{markers, CRLF};

/// Render a decimal integer straight into the output buffer.
pub(crate) fn write_decimal<I: itoa::Integer>(out: &mut dyn ByteStream, value: I) -> bool {
    let mut buf = itoa::Buffer::new();
    out.write(buf.format(value).as_bytes())
}

/// Emit the request array header `*K\r\n`.
pub fn write_header(out: &mut dyn ByteStream, arity: usize) -> bool {
    out.write_byte(markers::MULTI_BULK) && write_decimal(out, arity) && out.write(CRLF)
}

/// Emit one bulk-framed element: `$len\r\n<bytes>\r\n`.
pub fn write_bulk(out: &mut dyn ByteStream, data: &[u8]) -> bool {
    out.write_byte(markers::BULK)
        && write_decimal(out, data.len())
        && out.write(CRLF)
        && out.write(data)
        && out.write(CRLF)
}

/// Serialize one complete request frame.
///
/// Heterogeneous argument lists are tuples: `format_command(out, &("SET",
/// key, value))`. The header arity is the sum of every value's
/// [`Arg::arity`]; any failed write maps to [`Error::StreamError`].
pub fn format_command<A: Arg + ?Sized>(out: &mut dyn ByteStream, args: &A) -> Result<()> {
    if write_header(out, args.arity()) && args.write_arg(out) {
        Ok(())
    } else {
        Err(Error::StreamError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;

    fn render<A: Arg>(args: A) -> Vec<u8> {
        let mut out = MemoryStream::new();
        assert!(args.write_arg(&mut out));
        out.output().to_vec()
    }

    #[test]
    fn test_write_header() {
        let mut out = MemoryStream::new();
        assert!(write_header(&mut out, 10));
        assert_eq!(out.output(), b"*10\r\n");
    }

    #[test]
    fn test_write_bulk() {
        let mut out = MemoryStream::new();
        assert!(write_bulk(&mut out, b"this is test"));
        assert_eq!(out.output(), b"$12\r\nthis is test\r\n");
    }

    #[test]
    fn test_write_decimal_boundaries() {
        for (value, expected) in [
            (0i64, &b"0"[..]),
            (-1, b"-1"),
            (i64::MAX, b"9223372036854775807"),
            (i64::MIN, b"-9223372036854775808"),
        ] {
            let mut out = MemoryStream::new();
            assert!(write_decimal(&mut out, value));
            assert_eq!(out.output(), expected);
        }
    }

    #[test]
    fn test_format_command_counts_header() {
        let mut out = MemoryStream::new();
        format_command(&mut out, &("GET", "this_is_key")).unwrap();
        assert_eq!(out.output(), b"*2\r\n$3\r\nGET\r\n$11\r\nthis_is_key\r\n");
    }

    #[test]
    fn test_element_rendering_per_type() {
        assert_eq!(render(10), b"$2\r\n10\r\n");
        assert_eq!(render("test"), b"$4\r\ntest\r\n");
        assert_eq!(render(String::from("test")), b"$4\r\ntest\r\n");
        assert_eq!(render((1, 2)), b"$1\r\n1\r\n$1\r\n2\r\n");
        assert_eq!(render(vec![1, 2, 3]), b"$1\r\n1\r\n$1\r\n2\r\n$1\r\n3\r\n");
        assert_eq!(render(Blob(b"1234")), b"$4\r\n1234\r\n");
        assert_eq!(render(optional(true, (1, "test"))), b"$1\r\n1\r\n$4\r\ntest\r\n");
        assert_eq!(render(optional(false, (1, "test"))), b"");
    }
}
