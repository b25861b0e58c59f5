//! Subprocess Boundary
//!
//! Runs the wrapped validation tool and captures its complete stdout before
//! any parsing happens (no streaming). The tool is invoked by bare command
//! name with no arguments and is awaited without a timeout, so a hung tool
//! hangs the wrapper; that is a known property of the boundary, kept visible
//! here rather than papered over.

use tokio::process::Command;

use crate::error::{ReportError, Result};

/// Command name of the wrapped validation tool, resolved via PATH.
pub const DEFAULT_TOOL: &str = "edx-cleaner";

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Complete standard output, UTF-8 decoded.
    pub stdout: String,
    /// The tool's exit code, propagated verbatim as the wrapper's own.
    pub exit_code: i32,
}

/// Invokes the external validation tool.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    command: String,
}

impl ToolRunner {
    pub fn new() -> Self {
        Self::with_command(DEFAULT_TOOL)
    }

    /// Use a different command name (tests substitute a stand-in here).
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the tool to completion and capture its output.
    pub async fn run(&self) -> Result<ToolOutput> {
        let output = Command::new(&self.command)
            .output()
            .await
            .map_err(|source| ReportError::ToolLaunch {
                command: self.command.clone(),
                source,
            })?;

        let stdout =
            String::from_utf8(output.stdout).map_err(|source| ReportError::ToolOutputEncoding {
                command: self.command.clone(),
                source,
            })?;

        // A signal-terminated tool has no code; treat that as failure.
        let exit_code = output.status.code().unwrap_or(1);

        Ok(ToolOutput { stdout, exit_code })
    }
}

impl Default for ToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout_and_exit_code() {
        let runner = ToolRunner::with_command("pwd");
        let output = runner.run().await.unwrap();
        assert_eq!(output.exit_code, 0);
        assert!(!output.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_code_is_propagated() {
        let runner = ToolRunner::with_command("false");
        let output = runner.run().await.unwrap();
        assert_ne!(output.exit_code, 0);
    }

    #[tokio::test]
    async fn test_missing_command_is_a_launch_error() {
        let runner = ToolRunner::with_command("olx-report-no-such-tool");
        let err = runner.run().await.unwrap_err();
        match err {
            ReportError::ToolLaunch { command, .. } => {
                assert_eq!(command, "olx-report-no-such-tool");
            }
            other => panic!("expected ToolLaunch, got {:?}", other),
        }
    }

    #[test]
    fn test_default_tool_name() {
        assert_eq!(ToolRunner::new().command(), "edx-cleaner");
    }
}
