//! Byte cursors the scanner reads from.
//!
//! Two sources are supported: a sequential [`StreamCursor`] over any
//! [`BufRead`], which keeps its own pushback buffer across calls, and a
//! [`BufferCursor`] over an in-memory slice with a movable read position.

use std::io::{self, BufRead, Read};

use log::warn;

/// A byte source with one-directive lookahead and pushback.
pub trait Cursor {
    /// Returns the next byte without consuming it, or `None` at end of input.
    fn peek(&mut self) -> Option<u8>;

    /// Consumes and returns the next byte.
    fn consume(&mut self) -> Option<u8>;

    /// Restores `run`, previously consumed, so it is read again in the same
    /// order before anything else.
    fn push_back(&mut self, run: &[u8]);

    /// Number of bytes consumed through this cursor so far.
    fn position(&self) -> usize;

    /// Consumes bytes while `pred` holds and returns them.
    ///
    /// The byte that stops the loop is only peeked, so it stays available to
    /// the next directive or the next reader.
    fn take_while<P>(&mut self, mut pred: P) -> Vec<u8>
    where
        P: FnMut(u8) -> bool,
        Self: Sized,
    {
        let mut run = Vec::new();
        while let Some(byte) = self.peek() {
            if !pred(byte) {
                break;
            }
            self.consume();
            run.push(byte);
        }
        run
    }

    fn skip_whitespace(&mut self)
    where
        Self: Sized,
    {
        self.take_while(|b| b.is_ascii_whitespace());
    }
}

/// A pre-opened byte stream with `ungetc`-style pushback.
///
/// Bytes pushed back by a scan are held here, not in the wrapped reader, and
/// are served first by both the scanner and this type's own [`Read`] and
/// [`BufRead`] impls.
/// Keep the same `StreamCursor` across scans (and for any reads in between)
/// so nothing is lost.
///
/// Read errors other than [`io::ErrorKind::Interrupted`] end the input.
///
/// With [`BufRead`] also in scope, call the single-byte cursor method as
/// `Cursor::consume(&mut stream)`.
///
/// # Example
///
/// ```
/// use overscan::{scan_stream, Arg, StreamCursor};
/// use std::io::Read;
///
/// let mut stream = StreamCursor::new("XIVB".as_bytes());
/// let mut value = 0i32;
/// let count = scan_stream(&mut stream, "%Ro", &mut [Arg::from(&mut value)]).unwrap();
/// assert_eq!((count, value), (1, 14));
///
/// let mut rest = String::new();
/// stream.read_to_string(&mut rest).unwrap();
/// assert_eq!(rest, "B");
/// ```
#[derive(Debug)]
pub struct StreamCursor<R> {
    reader: R,
    /// Pushed-back bytes in read order.
    pending: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> StreamCursor<R> {
    pub fn new(reader: R) -> Self {
        StreamCursor {
            reader,
            pending: Vec::new(),
            pos: 0,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Bytes pushed back and not yet re-read.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Unwraps the reader. Any pending pushback is dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill_reader(&mut self) -> Option<u8> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("stream read failed, treating as end of input: {e}");
                    return None;
                }
            }
        }
    }
}

impl<R: BufRead> Cursor for StreamCursor<R> {
    fn peek(&mut self) -> Option<u8> {
        match self.pending.first() {
            Some(&b) => Some(b),
            None => self.fill_reader(),
        }
    }

    fn consume(&mut self) -> Option<u8> {
        let byte = if self.pending.is_empty() {
            let byte = self.fill_reader()?;
            self.reader.consume(1);
            byte
        } else {
            self.pending.remove(0)
        };
        self.pos += 1;
        Some(byte)
    }

    fn push_back(&mut self, run: &[u8]) {
        self.pending.splice(0..0, run.iter().copied());
        self.pos = self.pos.saturating_sub(run.len());
    }

    fn position(&self) -> usize {
        self.pos
    }
}

impl<R: BufRead> Read for StreamCursor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            return self.reader.read(buf);
        }
        let n = self.pending.len().min(buf.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

impl<R: BufRead> BufRead for StreamCursor<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pending.is_empty() {
            self.reader.fill_buf()
        } else {
            Ok(&self.pending)
        }
    }

    fn consume(&mut self, amt: usize) {
        if self.pending.is_empty() {
            self.reader.consume(amt);
        } else {
            let n = amt.min(self.pending.len());
            self.pending.drain(..n);
        }
    }
}

/// An in-memory byte sequence with a read position.
///
/// Successive directives continue from wherever the previous one stopped.
#[derive(Debug, Clone)]
pub struct BufferCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BufferCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BufferCursor { data, pos: 0 }
    }

    /// The unread tail of the buffer.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl Cursor for BufferCursor<'_> {
    fn peek(&mut self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn consume(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn push_back(&mut self, run: &[u8]) {
        debug_assert!(
            self.data[..self.pos].ends_with(run),
            "pushed-back bytes were not consumed from this buffer"
        );
        self.pos = self.pos.saturating_sub(run.len());
    }

    fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_take_while_keeps_terminator() {
        let mut cursor = BufferCursor::new(b"XIVB");
        let run = cursor.take_while(|b| b"IVXLCDM".contains(&b));
        assert_eq!(run, b"XIV");
        assert_eq!(cursor.peek(), Some(b'B'));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), b"B");
    }

    #[test]
    fn test_buffer_push_back_rewinds() {
        let mut cursor = BufferCursor::new(b"-x");
        assert_eq!(cursor.consume(), Some(b'-'));
        cursor.push_back(b"-");
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.consume(), Some(b'-'));
        assert_eq!(cursor.consume(), Some(b'x'));
        assert_eq!(cursor.consume(), None);
    }

    #[test]
    fn test_buffer_continues_between_runs() {
        let mut cursor = BufferCursor::new(b"101 77");
        assert_eq!(cursor.take_while(|b| b == b'0' || b == b'1'), b"101");
        cursor.skip_whitespace();
        assert_eq!(cursor.take_while(|b| b.is_ascii_digit()), b"77");
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_stream_take_while_keeps_terminator() {
        let mut stream = StreamCursor::new("XIVB".as_bytes());
        let run = stream.take_while(|b| b"IVXLCDM".contains(&b));
        assert_eq!(run, b"XIV");
        let mut rest = String::new();
        stream.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "B");
    }

    #[test]
    fn test_stream_push_back_order() {
        let mut stream = StreamCursor::new("abcd".as_bytes());
        assert_eq!(Cursor::consume(&mut stream), Some(b'a'));
        assert_eq!(Cursor::consume(&mut stream), Some(b'b'));
        stream.push_back(b"ab");
        assert_eq!(stream.pending(), b"ab");
        assert_eq!(stream.position(), 0);
        assert_eq!(stream.take_while(|_| true), b"abcd");
    }

    #[test]
    fn test_stream_pushback_visible_to_reader() {
        let mut stream = StreamCursor::new("-z".as_bytes());
        assert_eq!(Cursor::consume(&mut stream), Some(b'-'));
        stream.push_back(b"-");
        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"-z");
    }

    #[test]
    fn test_stream_buf_read_serves_pending_first() {
        let mut stream = StreamCursor::new("12\nnext\n".as_bytes());
        assert_eq!(stream.take_while(|b| b.is_ascii_digit()), b"12");
        stream.push_back(b"2");
        assert_eq!(stream.fill_buf().unwrap(), b"2");

        let mut line = String::new();
        stream.read_line(&mut line).unwrap();
        assert_eq!(line, "2\n");
        assert!(stream.pending().is_empty());

        line.clear();
        stream.read_line(&mut line).unwrap();
        assert_eq!(line, "next\n");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_stream_read_error_is_end_of_input() {
        let mut stream = StreamCursor::new(io::BufReader::new(FailingReader));
        assert_eq!(stream.peek(), None);
        assert_eq!(Cursor::consume(&mut stream), None);
    }
}
