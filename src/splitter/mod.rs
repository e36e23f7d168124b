//! Dump splitting state machine
//!
//! Lines before the first table marker are dropped. Every following line is
//! copied verbatim into the file of the last table marker seen, marker line
//! included.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub use fallible_iterator::FallibleIterator;
use log::debug;

use crate::lexer::{LineSplitter, LineType, Scanner};
use crate::Error;

pub mod marker;
pub mod output;

pub use output::{prepare_output_dir, table_path, TableFile, TableSummary};

/// Default destination directory
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Splitting configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// SQL dump
    pub source: PathBuf,
    /// Directory receiving one file per table
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            source: PathBuf::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Split `source` into the default output directory.
    pub fn new<P: Into<PathBuf>>(source: P) -> Config {
        Config {
            source: source.into(),
            ..Config::default()
        }
    }

    /// Change the output directory.
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Config {
        self.output_dir = dir.into();
        self
    }
}

/// Splitting progress
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A table marker has been found and its file created.
    TableStarted {
        /// Table identifier
        name: String,
        /// Output file
        path: PathBuf,
    },
    /// The file of a table has been closed.
    TableFinished(TableSummary),
}

/// Streams a dump and writes each table section into its own file.
///
/// At most one table file is open at any time.
pub struct DumpSplitter<R: Read> {
    scanner: Scanner<R, LineSplitter>,
    /// Absolute destination directory
    output_dir: PathBuf,
    current: Option<TableFile>,
    /// `TableStarted` delayed behind the `TableFinished` of the previous table
    pending: Option<Event>,
    tables: usize,
}

impl DumpSplitter<File> {
    /// Open `config.source` and prepare `config.output_dir`.
    ///
    /// The source is checked first so that a missing dump leaves the
    /// file system untouched.
    pub fn open(config: &Config) -> Result<DumpSplitter<File>, Error> {
        let source = open_source(&config.source)?;
        let output_dir = prepare_output_dir(&config.output_dir)?;
        debug!(
            "splitting {} into {}",
            config.source.display(),
            output_dir.display()
        );
        Ok(DumpSplitter::new(source, output_dir))
    }
}

fn open_source(path: &Path) -> Result<File, Error> {
    let unreadable = || Error::SourceUnreadable(path.to_path_buf());
    let file = File::open(path).map_err(|_| unreadable())?;
    match file.metadata() {
        Ok(metadata) if !metadata.is_dir() => Ok(file),
        _ => Err(unreadable()),
    }
}

impl<R: Read> DumpSplitter<R> {
    /// Split `input` into `output_dir`, which must already exist.
    pub fn new(input: R, output_dir: PathBuf) -> DumpSplitter<R> {
        DumpSplitter {
            scanner: Scanner::new(input, LineSplitter::new()),
            output_dir,
            current: None,
            pending: None,
            tables: 0,
        }
    }

    /// Destination directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of table markers seen so far
    pub fn tables(&self) -> usize {
        self.tables
    }

    /// Current line number in the dump
    pub fn line(&self) -> u64 {
        self.scanner.line()
    }
}

impl<R: Read> FallibleIterator for DumpSplitter<R> {
    type Item = Event;
    type Error = Error;

    fn next(&mut self) -> Result<Option<Event>, Error> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }
        loop {
            let line_no = self.scanner.line();
            let (line, line_type) = match self.scanner.scan()? {
                None => {
                    return match self.current.take() {
                        Some(table) => Ok(Some(Event::TableFinished(table.finish()?))),
                        None => Ok(None),
                    };
                }
                Some(tuple) => tuple,
            };
            let mut event = None;
            if line_type == LineType::Comment {
                if let Some(name) = marker::table_name(line) {
                    // close before open: only one table file at a time
                    let previous = match self.current.take() {
                        Some(table) => Some(table.finish()?),
                        None => None,
                    };
                    let table = TableFile::create(&self.output_dir, name)?;
                    debug!("table {} starts at line {}", table.name(), line_no);
                    let started = Event::TableStarted {
                        name: table.name().to_owned(),
                        path: table.path().to_path_buf(),
                    };
                    self.current = Some(table);
                    self.tables += 1;
                    event = Some(match previous {
                        Some(summary) => {
                            self.pending = Some(started);
                            Event::TableFinished(summary)
                        }
                        None => started,
                    });
                }
            }
            if let Some(table) = self.current.as_mut() {
                table.write_line(line)?;
            }
            if event.is_some() {
                return Ok(event);
            }
        }
    }
}

/// Split the dump described by `config`.
/// Return the summary of every table file written, in dump order.
pub fn split_dump(config: &Config) -> Result<Vec<TableSummary>, Error> {
    DumpSplitter::open(config)?
        .filter_map(|event| {
            Ok(match event {
                Event::TableFinished(summary) => Some(summary),
                Event::TableStarted { .. } => None,
            })
        })
        .collect()
}
