use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::lexer::ScanError;

/// Dump splitting errors
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading the dump, with the line being read
    Io(io::Error, Option<u64>),
    /// The output directory is missing and cannot be created
    CreateOutputDir(PathBuf, io::Error),
    /// The output directory exists but does not accept new files
    OutputDirNotWritable(PathBuf),
    /// The dump is missing, is not a regular file or cannot be opened
    SourceUnreadable(PathBuf),
    /// A table file cannot be created
    CreateTable(PathBuf, io::Error),
    /// A table file cannot be written or flushed
    WriteTable(PathBuf, io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(ref err, Some(line)) => write!(f, "{err} at line {line}"),
            Self::Io(ref err, None) => err.fmt(f),
            Self::CreateOutputDir(dir, _) => write!(
                f,
                "Could not create directory '{}'. Make sure you have necessary permissions",
                dir.display()
            ),
            Self::OutputDirNotWritable(dir) => {
                write!(f, "The directory '{}' is not writable", dir.display())
            }
            Self::SourceUnreadable(path) => {
                write!(f, "Make sure '{}' file exists and readable", path.display())
            }
            Self::CreateTable(path, ref err) => {
                write!(f, "Could not create '{}': {err}", path.display())
            }
            Self::WriteTable(path, ref err) => {
                write!(f, "Could not write '{}': {err}", path.display())
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(err, _)
            | Self::CreateOutputDir(_, err)
            | Self::CreateTable(_, err)
            | Self::WriteTable(_, err) => Some(err),
            Self::OutputDirNotWritable(_) | Self::SourceUnreadable(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err, None)
    }
}

impl ScanError for Error {
    fn position(&mut self, line: u64) {
        if let Self::Io(_, ref mut pos) = *self {
            *pos = Some(line);
        }
    }
}
