use clap::Parser;
use std::path::PathBuf;

use crate::utils::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "imgbox")]
#[command(version)]
#[command(about = "Upload images to imgbox.com", long_about = None)]
pub struct Cli {
    /// Image files to upload; newline-separated file paths are also read from stdin
    pub files: Vec<String>,

    /// Gallery title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Thumbnail width in pixels (default: 100 or the configured value)
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub thumb_width: Option<u32>,

    /// Make square thumbnails
    #[arg(short = 'q', long)]
    pub square_thumbs: bool,

    /// Enable comments
    #[arg(short, long)]
    pub comments: bool,

    /// Mark gallery as adult-only
    #[arg(short, long)]
    pub adult: bool,

    /// Print URLs as JSON object
    #[arg(short, long)]
    pub json: bool,

    /// Print debugging information
    #[arg(long)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(long, env = "IMGBOX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Which renderer prints the results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines, printed as uploads finish
    Text,
    /// One JSON array after all uploads finished
    Json,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_debug_flag(self.debug)
    }
}
