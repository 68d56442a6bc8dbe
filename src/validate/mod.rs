/// Local pre-flight checks on files before anything is uploaded - Gateway
mod checks;

pub use checks::{all_files_ok, check_file, FileProblem};
