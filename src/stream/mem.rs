//! In-memory stream: a transport whose peer is the test (or the caller).

use bytes::BytesMut;

use super::ByteStream;

/// A [`ByteStream`] over in-memory buffers.
///
/// Input is supplied up front (or incrementally) with [`feed`]; everything
/// the codec writes is captured and exposed through [`output`]. Each call
/// to `flush` records the output length at that point, so callers can
/// assert where flush boundaries fell.
///
/// [`feed`]: MemoryStream::feed
/// [`output`]: MemoryStream::output
#[derive(Debug, Default)]
pub struct MemoryStream {
    input: Vec<u8>,
    read_pos: usize,
    output: BytesMut,
    flushed_offsets: Vec<usize>,
    closed: bool,
}

impl MemoryStream {
    /// Create an open stream with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an open stream preloaded with `input`.
    pub fn with_input(input: &[u8]) -> Self {
        let mut stream = Self::new();
        stream.feed(input);
        stream
    }

    /// Append bytes to the input side.
    pub fn feed(&mut self, input: &[u8]) {
        self.input.extend_from_slice(input);
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take the written bytes, leaving the output buffer empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        self.flushed_offsets.clear();
        self.output.split().to_vec()
    }

    /// Output lengths recorded at each `flush` call.
    pub fn flushed_offsets(&self) -> &[usize] {
        &self.flushed_offsets
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.read_pos
    }
}

impl ByteStream for MemoryStream {
    fn is_open(&self) -> bool {
        !self.closed
    }

    fn close(&mut self) -> bool {
        self.closed = true;
        true
    }

    fn available(&self) -> usize {
        self.remaining()
    }

    fn peek(&mut self, n: usize) -> Option<&[u8]> {
        if self.closed || self.read_pos >= self.input.len() {
            return None;
        }
        let take = n.min(self.remaining());
        Some(&self.input[self.read_pos..self.read_pos + take])
    }

    fn read(&mut self, n: usize) -> Option<&[u8]> {
        if self.closed || self.read_pos >= self.input.len() {
            return None;
        }
        let take = n.min(self.remaining());
        let start = self.read_pos;
        self.read_pos += take;
        Some(&self.input[start..start + take])
    }

    fn skip(&mut self, n: usize) -> usize {
        let take = n.min(self.remaining());
        self.read_pos += take;
        take
    }

    fn write(&mut self, data: &[u8]) -> bool {
        if self.closed {
            return false;
        }
        self.output.extend_from_slice(data);
        true
    }

    fn flush(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.flushed_offsets.push(self.output.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = MemoryStream::with_input(b"hello");
        assert_eq!(stream.peek(3), Some(&b"hel"[..]));
        assert_eq!(stream.peek(3), Some(&b"hel"[..]));
        assert_eq!(stream.available(), 5);
    }

    #[test]
    fn test_read_consumes() {
        let mut stream = MemoryStream::with_input(b"hello");
        assert_eq!(stream.read(3), Some(&b"hel"[..]));
        assert_eq!(stream.read(3), Some(&b"lo"[..]));
        assert_eq!(stream.read(1), None);
    }

    #[test]
    fn test_peek_then_skip_advances_exactly() {
        let mut stream = MemoryStream::with_input(b"abcdef");
        let n = stream.peek(4).map(<[u8]>::len);
        assert_eq!(n, Some(4));
        assert_eq!(stream.skip(2), 2);
        assert_eq!(stream.read(2), Some(&b"cd"[..]));
    }

    #[test]
    fn test_short_view_at_end_of_input() {
        let mut stream = MemoryStream::with_input(b"ab");
        assert_eq!(stream.peek(64), Some(&b"ab"[..]));
    }

    #[test]
    fn test_write_and_flush_boundaries() {
        let mut stream = MemoryStream::new();
        assert!(stream.write(b"one"));
        assert!(stream.flush());
        assert!(stream.write(b"two"));
        assert!(stream.flush());
        assert_eq!(stream.output(), b"onetwo");
        assert_eq!(stream.flushed_offsets(), &[3, 6]);
    }

    #[test]
    fn test_closed_stream_rejects_io() {
        let mut stream = MemoryStream::with_input(b"data");
        assert!(stream.close());
        assert!(!stream.is_open());
        assert_eq!(stream.peek(1), None);
        assert!(!stream.write(b"x"));
        assert!(!stream.flush());
    }
}
