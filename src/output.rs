//! Writing shard results.
//!
//! Results are one address per line, in shard order, either to stdout or to
//! a `.txt` file.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ShardError;
use crate::fs_abstraction::FileSystem;

/// The only extension accepted for results files.
pub const RESULTS_EXTENSION: &str = "txt";

/// Where a shard is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// One address per line on stdout
    Console,
    /// Results file, already validated by [`resolve_results_path`]
    File(PathBuf),
}

impl OutputSink {
    /// Choose a sink, validating an explicit results path.
    pub fn from_results_path(results: Option<&Path>) -> Result<Self, ShardError> {
        match results {
            Some(path) => Ok(OutputSink::File(resolve_results_path(path)?)),
            None => Ok(OutputSink::Console),
        }
    }

    /// Emit `addresses` to this sink.
    pub fn emit<F: FileSystem + ?Sized>(
        &self,
        fs: &F,
        addresses: &[String],
    ) -> Result<(), ShardError> {
        match self {
            OutputSink::Console => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                write_lines(&mut handle, addresses)
                    .and_then(|_| handle.flush())
                    .map_err(|e| ShardError::Output {
                        path: PathBuf::from("<stdout>"),
                        source: e,
                    })
            }
            OutputSink::File(path) => {
                write_results_file(fs, path, addresses)?;
                info!("Results saved to {}", path.display());
                Ok(())
            }
        }
    }
}

/// Apply the extension rule: no extension gets `.txt` appended, `.txt` in
/// any case is kept, anything else is rejected.
pub fn resolve_results_path(path: &Path) -> Result<PathBuf, ShardError> {
    match path.extension().map(|e| e.to_string_lossy().to_lowercase()) {
        Some(ext) if ext == RESULTS_EXTENSION => Ok(path.to_path_buf()),
        Some(ext) if !ext.is_empty() => Err(ShardError::UnsupportedExtension(ext)),
        _ => {
            let name = path.file_name().ok_or_else(|| ShardError::Output {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            })?;
            let mut name = OsString::from(name);
            name.push(".");
            name.push(RESULTS_EXTENSION);
            let resolved = path.with_file_name(name);
            info!("No extension provided, using: {}", resolved.display());
            Ok(resolved)
        }
    }
}

/// Write `addresses` to `path`, creating parent directories as needed.
pub fn write_results_file<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    addresses: &[String],
) -> Result<(), ShardError> {
    let output_error = |source| ShardError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent).map_err(output_error)?;
    }

    let mut buf = Vec::with_capacity(addresses.iter().map(|a| a.len() + 1).sum());
    write_lines(&mut buf, addresses).map_err(output_error)?;
    fs.write(path, &buf).map_err(output_error)
}

/// One address per line, each newline-terminated.
pub fn write_lines<W: Write>(writer: &mut W, addresses: &[String]) -> io::Result<()> {
    for addr in addresses {
        writeln!(writer, "{}", addr)?;
    }
    Ok(())
}
