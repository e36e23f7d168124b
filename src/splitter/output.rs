//! Output directory and per-table files
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use log::{debug, info};

use crate::Error;

/// Make sure `dir` exists and accepts new files.
/// Return its absolute path.
pub fn prepare_output_dir(dir: &Path) -> Result<PathBuf, Error> {
    if !dir.is_dir() {
        debug!("creating output directory {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| Error::CreateOutputDir(dir.to_path_buf(), e))?;
    } else if !is_writable(dir) {
        return Err(Error::OutputDirNotWritable(dir.to_path_buf()));
    }
    fs::canonicalize(dir).map_err(|e| Error::CreateOutputDir(dir.to_path_buf(), e))
}

// Writable means a file can be created in it.
fn is_writable(dir: &Path) -> bool {
    tempfile::Builder::new()
        .prefix(".sqldump-split")
        .tempfile_in(dir)
        .is_ok()
}

/// Path of the file receiving table `name`: `<dir>/<name>.sql`.
///
/// The name is appended as is, without any sanitization, so separators and
/// `..` inside it are honoured.
pub fn table_path(dir: &Path, name: &[u8]) -> PathBuf {
    let mut path = OsString::from(dir.as_os_str());
    path.push(MAIN_SEPARATOR_STR);
    path.push(name_to_os(name));
    path.push(".sql");
    PathBuf::from(path)
}

#[cfg(unix)]
fn name_to_os(name: &[u8]) -> OsString {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(name).to_os_string()
}

#[cfg(not(unix))]
fn name_to_os(name: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(name).into_owned())
}

/// Open output file of the table being split.
#[derive(Debug)]
pub struct TableFile {
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    lines: u64,
    bytes: u64,
}

/// Statistics of a closed table file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
    /// Table identifier
    pub name: String,
    /// Output file
    pub path: PathBuf,
    /// Number of lines written, marker line included
    pub lines: u64,
    /// Number of bytes written
    pub bytes: u64,
}

impl TableFile {
    /// Create (or truncate) the file for table `name` inside `dir`.
    pub fn create(dir: &Path, name: &[u8]) -> Result<TableFile, Error> {
        let path = table_path(dir, name);
        let file = File::create(&path).map_err(|e| Error::CreateTable(path.clone(), e))?;
        Ok(TableFile {
            name: String::from_utf8_lossy(name).into_owned(),
            path,
            writer: BufWriter::new(file),
            lines: 0,
            bytes: 0,
        })
    }

    /// Table identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one raw line.
    pub fn write_line(&mut self, line: &[u8]) -> Result<(), Error> {
        self.writer
            .write_all(line)
            .map_err(|e| Error::WriteTable(self.path.clone(), e))?;
        self.lines += 1;
        self.bytes += line.len() as u64;
        Ok(())
    }

    /// Flush and close the file.
    pub fn finish(self) -> Result<TableSummary, Error> {
        let TableFile {
            name,
            path,
            writer,
            lines,
            bytes,
        } = self;
        let file = writer
            .into_inner()
            .map_err(|e| Error::WriteTable(path.clone(), e.into_error()))?;
        drop(file);
        info!("{}: {} lines, {} bytes", name, lines, bytes);
        Ok(TableSummary {
            name,
            path,
            lines,
            bytes,
        })
    }
}
