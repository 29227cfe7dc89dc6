//! Bounded chunk reading for large uploads.

use std::io::{self, Read};

/// `ChunkedReader` exposes a source reader one bounded chunk at a time.
///
/// Calling [`next_chunk`](ChunkedReader::next_chunk) arms a fresh chunk of at
/// most `chunk_size` bytes; reads then behave like a normal reader until the
/// chunk budget is spent, at which point they return `Ok(0)` (end of chunk,
/// not end of source). Once the source itself is exhausted it is dropped and
/// `next_chunk` returns `false` forever.
///
/// Usage:
///
/// ```
/// use std::io::Read;
/// use cubby_core::ChunkedReader;
///
/// # fn main() -> std::io::Result<()> {
/// let mut chunked = ChunkedReader::new(&b"hello world"[..], 4);
/// let mut chunk = Vec::new();
/// while chunked.next_chunk()? {
///     chunk.clear();
///     (&mut chunked).read_to_end(&mut chunk)?;
///     // upload `chunk` ...
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChunkedReader<R: Read> {
    /// `None` once the source reported end-of-stream; dropping it is the
    /// closing of the underlying source.
    source: Option<R>,
    chunk_size: usize,
    remaining: usize,
    /// Lookahead byte taken by `next_chunk` to detect end-of-stream at the
    /// chunk boundary instead of one activation late.
    peeked: Option<u8>,
}

impl<R: Read> ChunkedReader<R> {
    /// Wrap `source`, slicing it into chunks of `chunk_size` bytes.
    pub fn new(source: R, chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0, "chunk size must be positive");
        Self {
            source: Some(source),
            chunk_size,
            remaining: 0,
            peeked: None,
        }
    }

    /// Arm the next chunk. Returns `false` permanently once the source is
    /// exhausted; at that point the source has already been released.
    pub fn next_chunk(&mut self) -> io::Result<bool> {
        if self.source.is_none() {
            return Ok(false);
        }
        if self.peeked.is_none() && !self.fill_peek()? {
            self.source = None;
            return Ok(false);
        }
        self.remaining = self.chunk_size;
        Ok(true)
    }

    /// Read one byte ahead. Returns `false` on end-of-stream.
    fn fill_peek(&mut self) -> io::Result<bool> {
        let source = self.source.as_mut().expect("source still open");
        let mut byte = [0u8; 1];
        loop {
            match source.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.peeked = Some(byte[0]);
                    return Ok(true);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: Read> Read for ChunkedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            // End of the current chunk; the next chunk (if any) must be
            // armed explicitly.
            return Ok(0);
        }
        if self.source.is_none() {
            return Ok(0);
        }
        if let Some(byte) = self.peeked.take() {
            buf[0] = byte;
            self.remaining -= 1;
            return Ok(1);
        }
        let max = self.remaining.min(buf.len());
        let source = self.source.as_mut().expect("source still open");
        let n = source.read(&mut buf[..max])?;
        if n == 0 {
            // Source exhausted mid-chunk: release it now.
            self.source = None;
        } else {
            self.remaining -= n;
        }
        Ok(n)
    }
}
