use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::constants::MAX_FILE_SIZE;

/// Why a file can't be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileProblem {
    NotFound,
    NotAFile,
    NotReadable,
    TooLarge { limit: u64 },
}

impl fmt::Display for FileProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "No such file"),
            Self::NotAFile => write!(f, "Not a file"),
            Self::NotReadable => write!(f, "Not readable"),
            Self::TooLarge { limit } => write!(f, "File is larger than {} bytes", limit),
        }
    }
}

/// Check a single file, returning the first problem found
///
/// Checks run in order: existence, regular file, readability, size.
pub fn check_file(path: impl AsRef<Path>) -> Result<(), FileProblem> {
    check_file_with_limit(path.as_ref(), MAX_FILE_SIZE)
}

fn check_file_with_limit(path: &Path, limit: u64) -> Result<(), FileProblem> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(FileProblem::NotFound),
        Err(_) => return Err(FileProblem::NotReadable),
    };

    if !metadata.is_file() {
        return Err(FileProblem::NotAFile);
    }

    if File::open(path).is_err() {
        return Err(FileProblem::NotReadable);
    }

    if metadata.len() > limit {
        return Err(FileProblem::TooLarge { limit });
    }

    Ok(())
}

/// Check every path and report each problem as `<path>: <reason>`
///
/// All paths are checked even after a failure. Returns whether all of them
/// passed.
pub fn all_files_ok<W: Write>(paths: &[String], err: &mut W) -> io::Result<bool> {
    let mut ok = true;
    for path in paths {
        if let Err(problem) = check_file(path) {
            tracing::debug!("Rejecting {}: {:?}", path, problem);
            writeln!(err, "{}: {}", path, problem)?;
            ok = false;
        }
    }
    Ok(ok)
}
