use std::io::BufRead;

use crate::constants::COMMAND_NAME;
use crate::utils::ImgboxError;

/// Positional argument that means "read file paths from stdin only"
pub const STDIN_SENTINEL: &str = "-";

/// Combine file paths from stdin and from the command line
///
/// `stdin` is `None` when standard input is an interactive terminal. Paths
/// read from stdin come first, blank lines are skipped. A lone `-` argument is
/// not treated as a file name.
pub fn collect_files<R: BufRead>(
    args: &[String],
    stdin: Option<R>,
) -> Result<Vec<String>, ImgboxError> {
    let mut files = Vec::new();

    if let Some(reader) = stdin {
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                files.push(line);
            }
        }
        tracing::debug!("Read {} file path(s) from stdin", files.len());
    }

    if !(args.len() == 1 && args[0] == STDIN_SENTINEL) {
        files.extend(args.iter().cloned());
    }

    if files.is_empty() {
        return Err(ImgboxError::Input(format!(
            "Missing at least one image file. Run \"{} -h\" for more information.",
            COMMAND_NAME
        )));
    }

    Ok(files)
}
