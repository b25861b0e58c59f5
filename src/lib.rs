//! # olx-report Library
//!
//! Tooling for edX OLX course validation output: a wrapper around the
//! external `edx-cleaner` tool that re-buckets its line-oriented diagnostics
//! into MAJOR/MINOR/FYI tiers and renders a grouped, colorized report, plus
//! a course XML loader that walks a pointer-linked OLX directory tree and
//! collects a closed taxonomy of structural errors.
//!
//! The two halves do not interact: the binary drives the report pipeline,
//! while the loader is a standalone library surface.

pub mod cli;
pub mod collector;
pub mod error;
pub mod loader;
pub mod parser;
pub mod report;
pub mod runner;
pub mod severity;

pub use cli::Cli;
pub use collector::{Issue, IssueCollector};
pub use error::{ReportError, Result};
pub use loader::{CourseError, ErrorLevel, ErrorStore, load_course};
pub use parser::{LineGrammarParser, OutputParser, RawIssue, RawSeverity};
pub use report::{ReportRenderer, SectionFilter};
pub use runner::{DEFAULT_TOOL, ToolOutput, ToolRunner};
pub use severity::{Tier, TierMap};
