//! Diagnostic Output Parsing
//!
//! edx-cleaner reports findings one per line as
//! `<LEVEL> <TypeName> (<path>): <message>` with LEVEL being `WARNING` or
//! `ERROR`. This module scans captured tool output against that grammar and
//! produces structured issues. Anything that does not match (banners, blank
//! lines, unrelated chatter) is dropped silently; that tolerance is part of
//! the contract, so a format change in the tool surfaces as an empty report
//! rather than an error.
//!
//! The parser sits behind a trait so the tool could later emit structured
//! records without touching the classifier or renderer.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw severity label as printed by the wrapped tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawSeverity {
    Warning,
    Error,
}

impl RawSeverity {
    /// The label as it appears in tool output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RawSeverity::Warning => "WARNING",
            RawSeverity::Error => "ERROR",
        }
    }
}

/// One diagnostic line, decomposed but not yet resolved or classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    pub severity: RawSeverity,
    pub issue_type: String,
    pub file_path: String,
    pub message: String,
}

/// Strategy interface for turning captured tool output into issues.
pub trait OutputParser {
    /// Parse the complete captured stdout of the wrapped tool.
    fn parse(&self, output: &str) -> Vec<RawIssue>;
}

/// Regex-backed parser for the line-oriented diagnostic grammar.
#[derive(Debug)]
pub struct LineGrammarParser {
    pattern: Regex,
}

impl LineGrammarParser {
    pub fn new() -> Self {
        // Messages are single-line; the grammar has no escaping.
        let pattern = Regex::new(r"^(WARNING|ERROR) (\w+) \((.*?)\): (.*)")
            .expect("diagnostic line pattern is valid");
        Self { pattern }
    }

    /// Parse a single output line, if it matches the grammar.
    pub fn parse_line(&self, line: &str) -> Option<RawIssue> {
        let caps = self.pattern.captures(line)?;
        let severity = match &caps[1] {
            "ERROR" => RawSeverity::Error,
            _ => RawSeverity::Warning,
        };
        Some(RawIssue {
            severity,
            issue_type: caps[2].to_string(),
            file_path: caps[3].to_string(),
            message: caps[4].to_string(),
        })
    }
}

impl Default for LineGrammarParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputParser for LineGrammarParser {
    fn parse(&self, output: &str) -> Vec<RawIssue> {
        output
            .lines()
            .filter_map(|line| self.parse_line(line))
            .collect()
    }
}
