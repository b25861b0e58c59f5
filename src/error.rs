use std::string::FromUtf8Error;

use thiserror::Error;

/// Failure modes of the report wrapper itself.
///
/// Deliberately small: malformed diagnostic lines are dropped rather than
/// reported, and the heuristic file lookups treat a missing file as "no
/// match". Only the subprocess boundary can actually fail.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to launch '{command}': {source}")]
    ToolLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' produced non-UTF-8 output: {source}")]
    ToolOutputEncoding {
        command: String,
        #[source]
        source: FromUtf8Error,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ReportError>;
