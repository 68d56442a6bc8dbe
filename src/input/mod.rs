/// File path collection from arguments and stdin - Gateway
mod files;

pub use files::{collect_files, STDIN_SENTINEL};
