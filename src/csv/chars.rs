//! Decoding byte streams into characters with one-character lookahead

use encoding_rs::{Decoder, Encoding};
use std::io::{self, Read};

const CHUNK_SIZE: usize = 8 * 1024;

/// Character source over any `Read`, decoded with `encoding_rs`
///
/// The decoder sniffs a byte order mark, so UTF-8 and UTF-16 files with a
/// BOM decode correctly whatever encoding was requested. Malformed byte
/// sequences decode to U+FFFD instead of failing.
pub struct CharReader<R> {
    inner: R,
    decoder: Decoder,
    bytes: Vec<u8>,
    decoded: String,
    pos: usize,
    eof: bool,
    // Bytes have been pulled from `inner`
    started: bool,
}

impl<R: Read> CharReader<R> {
    /// Wrap a byte stream
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        CharReader {
            inner,
            decoder: encoding.new_decoder(),
            bytes: vec![0; CHUNK_SIZE],
            decoded: String::with_capacity(CHUNK_SIZE),
            pos: 0,
            eof: false,
            started: false,
        }
    }

    /// Switch encoding. Refused once bytes have been read, since buffered
    /// text was already decoded with the old one.
    pub(crate) fn set_encoding(&mut self, encoding: &'static Encoding) -> bool {
        if self.started {
            return false;
        }
        self.decoder = encoding.new_decoder();
        true
    }

    /// Consume the next character
    pub fn next_char(&mut self) -> io::Result<Option<char>> {
        let next = self.peek_char()?;
        if let Some(c) = next {
            self.pos += c.len_utf8();
        }
        Ok(next)
    }

    /// Look at the next character without consuming it
    pub fn peek_char(&mut self) -> io::Result<Option<char>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.decoded[self.pos..].chars().next())
    }

    /// Consume the next character if it equals `expected`
    pub fn next_if_eq(&mut self, expected: char) -> io::Result<bool> {
        if self.peek_char()? == Some(expected) {
            self.pos += expected.len_utf8();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Ensure there is decoded text at `pos`; false once the stream is drained
    fn fill(&mut self) -> io::Result<bool> {
        while self.pos >= self.decoded.len() {
            if self.eof {
                return Ok(false);
            }
            self.decoded.clear();
            self.pos = 0;
            self.started = true;

            let n = match self.inner.read(&mut self.bytes) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let last = n == 0;
            let needed = self
                .decoder
                .max_utf8_buffer_length(n)
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "decode buffer overflow"))?;
            self.decoded.reserve(needed);
            // Capacity covers the worst case, so the whole chunk is consumed
            let _ = self
                .decoder
                .decode_to_string(&self.bytes[..n], &mut self.decoded, last);
            self.eof = last;
        }
        Ok(true)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
