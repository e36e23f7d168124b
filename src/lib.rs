//! Split a SQL dump into one file per table
//!
//! Table sections are delimited by the comment `mysqldump` writes before
//! each table definition:
//! ```text
//! -- Table structure for table `users`
//! ```
#![warn(missing_docs)]

mod error;
pub mod lexer;
pub mod splitter;

pub use error::Error;
pub use splitter::{split_dump, Config, DumpSplitter, Event, FallibleIterator};
