//! Adaptation of the [Go scanner](http://tip.golang.org/pkg/bufio/#Scanner)
//! to any `Read` input.

use log::{debug, trace};

use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, Read};
use std::ops::Range;

/// Error that can be positioned in the input.
pub trait ScanError: Error + From<io::Error> + Sized {
    /// Record the (1-based) line where the error occurred.
    fn position(&mut self, line: u64);
}

/// The `(Range<usize>, TokenType)` locates the token inside `data`.
/// And the `usize` is the amount of bytes to consume.
type SplitResult<TokenType, Error> = Result<(Option<(Range<usize>, TokenType)>, usize), Error>;

/// Split function used to tokenize the input
pub trait Splitter: Sized {
    /// Error returned when the input cannot be tokenized
    type Error: ScanError;
    /// Classification attached to each token
    type TokenType;

    /// The arguments are an initial substring of the remaining unprocessed
    /// data and a flag, `eof`, that reports whether the reader has no more
    /// data to give.
    ///
    /// Returning `(None, 0)` asks for more data.
    /// Returning `(None, n)` skips `n` bytes.
    /// If the returned error is non-nil, scanning stops and the error
    /// is returned to the client.
    ///
    /// The function is never called with an empty data slice unless `eof`
    /// is true.
    fn split(&mut self, data: &[u8], eof: bool) -> SplitResult<Self::TokenType, Self::Error>;
}

const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Like a `BufReader` but with a growable buffer.
/// Successive calls to the `scan` method will step through the 'tokens'
/// of a file, skipping the bytes between the tokens.
///
/// Scanning stops unrecoverably at EOF or at the first I/O error.
/// A token never has to fit in the initial capacity: the buffer grows until
/// the splitter is satisfied.
pub struct Scanner<R, S: Splitter> {
    /// The reader provided by the client.
    inner: R,
    /// The function to tokenize the input.
    splitter: S,
    /// Buffer used as argument to split.
    buf: Vec<u8>,
    /// First non-processed byte in buf.
    pos: usize,
    /// End of data in buf.
    cap: usize,
    eof: bool,
    /// current line number
    line: u64,
}

impl<R: Read, S: Splitter> Scanner<R, S> {
    /// Constructor
    pub fn new(inner: R, splitter: S) -> Scanner<R, S> {
        Self::with_capacity(inner, splitter, DEFAULT_CAPACITY)
    }

    fn with_capacity(inner: R, splitter: S, capacity: usize) -> Scanner<R, S> {
        Scanner {
            inner,
            splitter,
            buf: vec![0; capacity.max(1)],
            pos: 0,
            cap: 0,
            eof: false,
            line: 1,
        }
    }

    /// Current line number
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Advance the Scanner to next token.
    /// Return the token as a byte slice.
    /// Return `None` when the end of the input is reached.
    /// Return any error that occurs while reading the input.
    pub fn scan(&mut self) -> Result<Option<(&[u8], S::TokenType)>, S::Error> {
        trace!(target: "scanner", "scan(line: {})", self.line);
        // Loop until we have a token.
        loop {
            // See if we can get a token with what we already have.
            if self.cap > self.pos || self.eof {
                let data = &self.buf[self.pos..self.cap];
                match self.splitter.split(data, self.eof) {
                    Err(mut e) => {
                        e.position(self.line);
                        return Err(e);
                    }
                    Ok((None, 0)) => {
                        // Request more data
                    }
                    Ok((None, amt)) => {
                        // Ignore/skip this data
                        self.consume(amt);
                        continue;
                    }
                    Ok((Some((range, token_type)), amt)) => {
                        debug_assert!(range.end <= amt);
                        let token = self.pos + range.start..self.pos + range.end;
                        self.consume(amt);
                        return Ok(Some((&self.buf[token], token_type)));
                    }
                }
            }
            // We cannot generate a token with what we are holding.
            // If we've already hit EOF, we are done.
            if self.eof {
                self.pos = 0;
                self.cap = 0;
                return Ok(None);
            }
            if let Err(e) = self.fill_buf().map(|_| ()) {
                let mut err = S::Error::from(e);
                err.position(self.line);
                return Err(err);
            }
        }
    }
}

impl<R: Read, S: Splitter> BufRead for Scanner<R, S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        // First, shift data to beginning of buffer if there's lots of empty space
        // or space is needed.
        if self.pos > 0 && (self.cap == self.buf.len() || self.pos > self.buf.len() / 2) {
            self.buf.copy_within(self.pos..self.cap, 0);
            self.cap -= self.pos;
            self.pos = 0;
        }
        // Is the buffer full? If so, resize.
        if self.cap == self.buf.len() {
            let len = self.buf.len() * 2;
            debug!(target: "scanner", "grow buffer to {} bytes", len);
            self.buf.resize(len, 0);
        }
        // Finally we can read some input.
        loop {
            match self.inner.read(&mut self.buf[self.cap..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => {
                    self.cap += n;
                    break;
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(e);
                }
            }
        }
        Ok(&self.buf[self.pos..self.cap])
    }

    /// Consume `amt` bytes of the buffer.
    fn consume(&mut self, amt: usize) {
        trace!(target: "scanner", "consume({})", amt);
        assert!(self.pos + amt <= self.cap);
        self.line += memchr::memchr_iter(b'\n', &self.buf[self.pos..self.pos + amt]).count() as u64;
        self.pos += amt;
    }
}

impl<R: Read, S: Splitter> Read for Scanner<R, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let nread = {
            let mut rem = self.fill_buf()?;
            rem.read(buf)?
        };
        self.consume(nread);
        Ok(nread)
    }
}

impl<R, S: Splitter> fmt::Debug for Scanner<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("pos", &self.pos)
            .field("cap", &self.cap)
            .field("eof", &self.eof)
            .field("line", &self.line)
            .finish()
    }
}
