//! Streaming line lexer

pub mod line;
mod scan;

pub use line::{LineSplitter, LineType};
pub use scan::{ScanError, Scanner, Splitter};
