//! Line tokenizer for SQL dumps.
use std::ops::Range;

use memchr::memchr;

use super::scan::Splitter;
use crate::Error;

/// Line classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineType {
    /// Line starting with `--`: may be a table marker
    Comment,
    /// Any other line
    Other,
}

/// Splits input into raw lines.
///
/// Each token is a full line, `\n` terminator included, so that writing the
/// tokens back in order reproduces the input byte for byte. The last line of
/// the input may have no terminator.
#[derive(Debug, Default)]
pub struct LineSplitter {}

impl LineSplitter {
    /// Constructor
    pub fn new() -> LineSplitter {
        LineSplitter {}
    }
}

impl Splitter for LineSplitter {
    type Error = Error;
    type TokenType = LineType;

    fn split(
        &mut self,
        data: &[u8],
        eof: bool,
    ) -> Result<(Option<(Range<usize>, LineType)>, usize), Error> {
        let end = match memchr(b'\n', data) {
            Some(i) => i + 1,
            None if eof && !data.is_empty() => data.len(),
            // else ask more data until '\n'
            None => return Ok((None, 0)),
        };
        let line_type = if data.starts_with(b"--") {
            LineType::Comment
        } else {
            LineType::Other
        };
        Ok((Some((0..end, line_type)), end))
    }
}
