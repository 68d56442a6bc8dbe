use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Verbosity of diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Debug,
}

impl LogLevel {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            Self::Debug
        } else {
            Self::Warn
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Debug => "debug",
        }
    }
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn init_logger(level: LogLevel) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr) // stdout carries results only
                .with_target(level == LogLevel::Debug)
                .with_thread_ids(false)
                .with_thread_names(false)
                .without_time()
                .compact(),
        )
        .init();
}
