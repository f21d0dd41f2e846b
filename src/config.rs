//! Console configuration.

use std::path::PathBuf;

use clap::Args;

/// Directory source settings.
#[derive(Debug, Args)]
pub struct DirectoryConfig {
    /// Directory document URL or local path
    #[arg(long = "directory-url", env = "TOMBOLA_DIRECTORY_URL")]
    pub source: String,
}

/// Session storage settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Path of the durable session file
    #[arg(
        long,
        env = "TOMBOLA_SESSION_FILE",
        default_value = ".tombola-session.json"
    )]
    pub session_file: PathBuf,
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
