//! Per-type serialization traits for command values.
//!
//! Every value a command can carry implements [`Arg`]: it knows how many
//! bulk elements it contributes to the request array and how to write
//! them. Where the arity is a property of the type rather than the value,
//! the type also implements [`FixedArg`]; sequence elements must be
//! `FixedArg` so container arity stays a multiplication rather than a
//! scan, and recursively dynamic containers are rejected at compile time.

use std::ffi::{CStr, CString};

use bytes::Bytes;

use super::{write_bulk, write_decimal};
use crate::stream::ByteStream;
use crate::{markers, CRLF};

/// A value serializable as zero or more bulk elements of a RESP request.
pub trait Arg {
    /// Number of bulk elements this value contributes. Computed without
    /// serializing.
    fn arity(&self) -> usize;

    /// Write the value as bulk-framed elements. Returns false on the
    /// first failed write.
    fn write_arg(&self, out: &mut dyn ByteStream) -> bool;
}

/// An [`Arg`] whose arity is known at compile time.
pub trait FixedArg: Arg {
    /// Bulk elements contributed by any value of this type.
    const ARITY: usize;
}

/// Marker for values that serialize as exactly one bulk element.
///
/// The single-value command family (`SET`, `HSET`, `PUBLISH`, ...) bounds
/// its value types with this trait, so a pair or a sequence cannot be
/// smuggled in where the protocol expects one element.
pub trait SingleArg: FixedArg {}

impl<T: Arg + ?Sized> Arg for &T {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
        (**self).write_arg(out)
    }
}

impl<T: FixedArg + ?Sized> FixedArg for &T {
    const ARITY: usize = T::ARITY;
}

impl<T: SingleArg + ?Sized> SingleArg for &T {}

// `u8` is deliberately absent: with it, `Vec<u8>` would serialize as a
// sequence of one-digit integers instead of failing to compile. Raw byte
// strings are `Bytes`, `Blob`, or `String`/`&str`.
macro_rules! integer_arg {
    ($($int:ty)*) => {$(
        impl Arg for $int {
            fn arity(&self) -> usize {
                1
            }

            fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
                let mut buf = itoa::Buffer::new();
                write_bulk(out, buf.format(*self).as_bytes())
            }
        }

        impl FixedArg for $int {
            const ARITY: usize = 1;
        }

        impl SingleArg for $int {}
    )*};
}

integer_arg!(i8 i16 i32 i64 isize u16 u32 u64 usize);

macro_rules! bytes_arg {
    ($($ty:ty => |$value:ident| $view:expr;)*) => {$(
        impl Arg for $ty {
            fn arity(&self) -> usize {
                1
            }

            fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
                let $value = self;
                write_bulk(out, $view)
            }
        }

        impl FixedArg for $ty {
            const ARITY: usize = 1;
        }

        impl SingleArg for $ty {}
    )*};
}

bytes_arg! {
    str => |v| v.as_bytes();
    String => |v| v.as_bytes();
    Bytes => |v| v;
    CStr => |v| v.to_bytes();
    CString => |v| v.as_bytes();
}

/// Non-owning byte view, written verbatim as one bulk element.
#[derive(Debug, Clone, Copy)]
pub struct Blob<'a>(pub &'a [u8]);

impl Arg for Blob<'_> {
    fn arity(&self) -> usize {
        1
    }

    fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
        write_bulk(out, self.0)
    }
}

impl FixedArg for Blob<'_> {
    const ARITY: usize = 1;
}

impl SingleArg for Blob<'_> {}

/// Wide (UTF-16) string payload: the raw bytes of the code units, native
/// byte order, as one bulk element.
#[derive(Debug, Clone, Copy)]
pub struct Wide<'a>(pub &'a [u16]);

impl Arg for Wide<'_> {
    fn arity(&self) -> usize {
        1
    }

    fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
        let byte_len = self.0.len() * 2;
        if !(out.write_byte(markers::BULK) && write_decimal(out, byte_len) && out.write(CRLF)) {
            return false;
        }
        for unit in self.0 {
            if !out.write(&unit.to_ne_bytes()) {
                return false;
            }
        }
        out.write(CRLF)
    }
}

impl FixedArg for Wide<'_> {
    const ARITY: usize = 1;
}

impl SingleArg for Wide<'_> {}

/// A sorted-set score endpoint, possibly exclusive or infinite.
///
/// Serialization: inclusive bounds as the bare decimal, exclusive bounds
/// with a `(` prefix, and the infinities as `-inf` / `+inf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// The score itself is part of the range.
    Inclusive(i64),
    /// The score itself is excluded from the range.
    Exclusive(i64),
    /// Negative infinity.
    NegInf,
    /// Positive infinity.
    PosInf,
}

impl Default for Interval {
    fn default() -> Self {
        Interval::Inclusive(0)
    }
}

impl Arg for Interval {
    fn arity(&self) -> usize {
        1
    }

    fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
        let mut buf = itoa::Buffer::new();
        match self {
            Interval::Inclusive(value) => write_bulk(out, buf.format(*value).as_bytes()),
            Interval::Exclusive(value) => {
                let digits = buf.format(*value).as_bytes();
                out.write_byte(markers::BULK)
                    && write_decimal(out, digits.len() + 1)
                    && out.write(CRLF)
                    && out.write_byte(b'(')
                    && out.write(digits)
                    && out.write(CRLF)
            }
            Interval::NegInf => write_bulk(out, b"-inf"),
            Interval::PosInf => write_bulk(out, b"+inf"),
        }
    }
}

impl FixedArg for Interval {
    const ARITY: usize = 1;
}

impl SingleArg for Interval {}

impl<T: FixedArg> Arg for [T] {
    fn arity(&self) -> usize {
        self.len() * T::ARITY
    }

    fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
        self.iter().all(|item| item.write_arg(out))
    }
}

impl<T: FixedArg> Arg for Vec<T> {
    fn arity(&self) -> usize {
        self.as_slice().arity()
    }

    fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
        self.as_slice().write_arg(out)
    }
}

macro_rules! tuple_arg {
    ($($name:ident)+) => {
        #[allow(non_snake_case)]
        impl<$($name: Arg),+> Arg for ($($name,)+) {
            fn arity(&self) -> usize {
                let ($($name,)+) = self;
                0 $(+ $name.arity())+
            }

            fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
                let ($($name,)+) = self;
                true $(&& $name.write_arg(out))+
            }
        }

        impl<$($name: FixedArg),+> FixedArg for ($($name,)+) {
            const ARITY: usize = 0 $(+ $name::ARITY)+;
        }
    };
}

tuple_arg!(T1);
tuple_arg!(T1 T2);
tuple_arg!(T1 T2 T3);
tuple_arg!(T1 T2 T3 T4);
tuple_arg!(T1 T2 T3 T4 T5);
tuple_arg!(T1 T2 T3 T4 T5 T6);
tuple_arg!(T1 T2 T3 T4 T5 T6 T7);
tuple_arg!(T1 T2 T3 T4 T5 T6 T7 T8);
tuple_arg!(T1 T2 T3 T4 T5 T6 T7 T8 T9);
tuple_arg!(T1 T2 T3 T4 T5 T6 T7 T8 T9 T10);

/// A conditionally-emitted group of values; see [`optional`].
#[derive(Debug, Clone, Copy)]
pub struct Opt<T> {
    condition: bool,
    value: T,
}

/// Gate `value` on `condition`: arity 0 and no output when false,
/// otherwise exactly the value itself. Multi-value groups are tuples:
/// `optional(use_limit, ("LIMIT", offset, count))`.
pub fn optional<T: Arg>(condition: bool, value: T) -> Opt<T> {
    Opt { condition, value }
}

impl<T: Arg> Arg for Opt<T> {
    fn arity(&self) -> usize {
        if self.condition {
            self.value.arity()
        } else {
            0
        }
    }

    fn write_arg(&self, out: &mut dyn ByteStream) -> bool {
        !self.condition || self.value.write_arg(out)
    }
}
