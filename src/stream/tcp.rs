//! Blocking TCP transport.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, trace};

use super::ByteStream;

const READ_CHUNK: usize = 4096;

/// Connection options for [`TcpTransport::connect`].
#[derive(Debug, Clone)]
pub struct ConnectOpts {
    /// Deadline for establishing the connection.
    pub connect_timeout: Duration,
    /// Read timeout on the connected socket; `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
    /// Write timeout on the connected socket; `None` blocks indefinitely.
    pub write_timeout: Option<Duration>,
    /// Disable Nagle's algorithm. Request/response round trips want this.
    pub nodelay: bool,
    /// Initial capacity of the read and write buffers.
    pub buffer_size: usize,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: None,
            write_timeout: None,
            nodelay: true,
            buffer_size: 16 * 1024,
        }
    }
}

/// A [`ByteStream`] over a blocking `std::net::TcpStream`.
///
/// Input is buffered with a compacting read cursor; output accumulates in
/// a [`BytesMut`] until `flush`. `read(n)` blocks until exactly `n` bytes
/// are buffered or the transport fails. `peek(n)` blocks only until at
/// least one byte is buffered, then drains whatever the socket already has
/// pending, so a peek larger than the reply in flight does not deadlock.
///
/// The last transport error is retained and can be inspected through
/// [`transport_error`](TcpTransport::transport_error) after an operation
/// reports failure.
#[derive(Debug)]
pub struct TcpTransport {
    socket: Option<TcpStream>,
    read_buf: Vec<u8>,
    read_pos: usize,
    compact_threshold: usize,
    write_buf: BytesMut,
    last_error: Option<io::Error>,
}

impl TcpTransport {
    /// Connect to `addr`, trying each resolved address in turn.
    pub fn connect<A: ToSocketAddrs>(addr: A, opts: &ConnectOpts) -> io::Result<Self> {
        let mut last_err = None;
        for sock_addr in addr.to_socket_addrs()? {
            match TcpStream::connect_timeout(&sock_addr, opts.connect_timeout) {
                Ok(socket) => {
                    socket.set_nodelay(opts.nodelay)?;
                    socket.set_read_timeout(opts.read_timeout)?;
                    socket.set_write_timeout(opts.write_timeout)?;
                    debug!(addr = %sock_addr, "connected");
                    return Ok(Self {
                        socket: Some(socket),
                        read_buf: Vec::with_capacity(opts.buffer_size),
                        read_pos: 0,
                        compact_threshold: opts.buffer_size,
                        write_buf: BytesMut::with_capacity(opts.buffer_size),
                        last_error: None,
                    });
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
        }))
    }

    /// The transport error behind the most recent failed operation.
    pub fn transport_error(&self) -> Option<&io::Error> {
        self.last_error.as_ref()
    }

    fn buffered(&self) -> usize {
        self.read_buf.len() - self.read_pos
    }

    /// Drop consumed bytes so the buffer does not grow without bound.
    fn compact(&mut self) {
        if self.read_pos == self.read_buf.len() {
            self.read_buf.clear();
            self.read_pos = 0;
        } else if self.read_pos >= self.compact_threshold {
            self.read_buf.drain(..self.read_pos);
            self.read_pos = 0;
        }
    }

    /// One `read` call appended to the buffer. Returns the byte count;
    /// `Ok(0)` is end of stream.
    fn recv_append(&mut self) -> io::Result<usize> {
        let old_len = self.read_buf.len();
        self.read_buf.resize(old_len + READ_CHUNK, 0);
        let mut socket = match self.socket.as_ref() {
            Some(s) => s,
            None => {
                self.read_buf.truncate(old_len);
                return Err(io::ErrorKind::NotConnected.into());
            }
        };
        match socket.read(&mut self.read_buf[old_len..]) {
            Ok(n) => {
                self.read_buf.truncate(old_len + n);
                Ok(n)
            }
            Err(e) => {
                self.read_buf.truncate(old_len);
                Err(e)
            }
        }
    }

    /// Blocking refill of at least one byte.
    fn fill_some(&mut self) -> bool {
        self.compact();
        match self.recv_append() {
            Ok(0) => {
                self.last_error = Some(io::ErrorKind::UnexpectedEof.into());
                false
            }
            Ok(_) => true,
            Err(e) => {
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Drain whatever the socket already has pending, up to `want` bytes
    /// buffered, without blocking.
    fn top_up(&mut self, want: usize) {
        let Some(socket) = self.socket.as_ref() else {
            return;
        };
        if socket.set_nonblocking(true).is_err() {
            return;
        }
        while self.buffered() < want {
            match self.recv_append() {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    self.last_error = Some(e);
                    break;
                }
            }
        }
        if let Some(socket) = self.socket.as_ref() {
            let _ = socket.set_nonblocking(false);
        }
    }
}

impl ByteStream for TcpTransport {
    fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    fn close(&mut self) -> bool {
        let Some(socket) = self.socket.take() else {
            return true;
        };
        self.read_buf.clear();
        self.read_pos = 0;
        self.write_buf.clear();
        trace!("closing connection");
        match socket.shutdown(Shutdown::Both) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotConnected => true,
            Err(e) => {
                self.last_error = Some(e);
                false
            }
        }
    }

    fn available(&self) -> usize {
        self.buffered()
    }

    fn peek(&mut self, n: usize) -> Option<&[u8]> {
        if self.socket.is_none() {
            return None;
        }
        if self.buffered() == 0 && !self.fill_some() {
            return None;
        }
        if self.buffered() < n {
            self.top_up(n);
        }
        let take = n.min(self.buffered());
        Some(&self.read_buf[self.read_pos..self.read_pos + take])
    }

    fn read(&mut self, n: usize) -> Option<&[u8]> {
        if self.socket.is_none() {
            return None;
        }
        while self.buffered() < n {
            if !self.fill_some() {
                return None;
            }
        }
        let start = self.read_pos;
        self.read_pos += n;
        Some(&self.read_buf[start..start + n])
    }

    fn skip(&mut self, n: usize) -> usize {
        match self.read(n) {
            Some(view) => view.len(),
            None => 0,
        }
    }

    fn write(&mut self, data: &[u8]) -> bool {
        if self.socket.is_none() {
            return false;
        }
        self.write_buf.extend_from_slice(data);
        true
    }

    fn flush(&mut self) -> bool {
        let Some(mut socket) = self.socket.as_ref() else {
            return false;
        };
        if let Err(e) = socket.write_all(&self.write_buf).and_then(|()| socket.flush()) {
            self.last_error = Some(e);
            return false;
        }
        trace!(bytes = self.write_buf.len(), "flushed request buffer");
        self.write_buf.clear();
        true
    }
}
