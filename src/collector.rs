//! Issue Collection and Path Resolution
//!
//! Collects parsed diagnostics for one wrapper run, resolving each reported
//! path against a base directory. Two lookups are heuristic best-effort:
//! policy files live somewhere under `policies/` rather than at the path the
//! tool prints, and missing-file issues about HTML content get a pointer to
//! the sibling `.html` source when one exists. Absence of a match is silent
//! in both cases.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::Regex;
use serde::Serialize;

use crate::parser::{RawIssue, RawSeverity};
use crate::severity::{Tier, TierMap};

/// Reported filenames that are searched for under `policies/` instead of
/// being joined onto the base path directly.
const POLICY_FILES: &[&str] = &["policy.json", "grading_policy.json"];

/// One validation issue with its path resolved. Immutable once collected.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: RawSeverity,
    pub issue_type: String,
    pub file_path: PathBuf,
    pub message: String,
    /// Cross-reference annotation, empty when no lookup matched.
    pub extra_info: String,
}

impl Issue {
    /// Base name of the resolved path, used as the sort key within a type.
    pub fn base_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}): {}{}",
            self.severity.as_str(),
            self.issue_type,
            self.file_path.display(),
            self.message,
            self.extra_info
        )
    }
}

/// Run-scoped aggregator mapping resolved file paths to their issues.
#[derive(Debug)]
pub struct IssueCollector {
    base_path: PathBuf,
    issues_by_file: BTreeMap<PathBuf, Vec<Issue>>,
    url_name_pattern: Regex,
}

impl IssueCollector {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            issues_by_file: BTreeMap::new(),
            url_name_pattern: Regex::new(r"url_name='([^']+)'")
                .expect("url_name pattern is valid"),
        }
    }

    /// Collect a parsed diagnostic, resolving its reported path.
    pub fn add(&mut self, raw: RawIssue) {
        let full_path = if POLICY_FILES.contains(&raw.file_path.as_str()) {
            self.find_policy_file(&raw.file_path)
        } else {
            self.base_path.join(&raw.file_path)
        };

        let extra_info = if raw.issue_type == "MissingFile" && raw.file_path.contains("html") {
            self.html_source_info(&raw.file_path, &raw.message)
        } else {
            String::new()
        };

        let issue = Issue {
            severity: raw.severity,
            issue_type: raw.issue_type,
            file_path: full_path.clone(),
            message: raw.message,
            extra_info,
        };
        self.issues_by_file.entry(full_path).or_default().push(issue);
    }

    /// Search the `policies/` subtree for the named file, in walk order.
    /// Falls back to the naive join when nothing matches.
    fn find_policy_file(&self, name: &str) -> PathBuf {
        let walker = WalkBuilder::new(self.base_path.join("policies"))
            .standard_filters(false)
            .build();
        for entry in walker.flatten() {
            if entry.file_type().is_some_and(|t| t.is_file())
                && entry.file_name().to_str() == Some(name)
            {
                return entry.into_path();
            }
        }
        self.base_path.join(name)
    }

    /// Build the `[HTML source: …]` annotation for a missing-file issue, if
    /// the message names a url_name and the matching `.html` file exists.
    fn html_source_info(&self, file_path: &str, message: &str) -> String {
        let Some(caps) = self.url_name_pattern.captures(message) else {
            return String::new();
        };
        let url_name = &caps[1];
        // The second-to-last path segment names the content type ("html").
        let mut segments = file_path.rsplit('/');
        segments.next();
        let Some(file_type) = segments.next() else {
            return String::new();
        };
        let candidate = self
            .base_path
            .join(file_type)
            .join(format!("{url_name}.html"));
        if candidate.exists() {
            format!(" [HTML source: {}]", candidate.display())
        } else {
            String::new()
        }
    }

    /// Resolved paths with their issues, ordered by path.
    pub fn issues_by_file(&self) -> &BTreeMap<PathBuf, Vec<Issue>> {
        &self.issues_by_file
    }

    /// Issues in the given tier, grouped by issue type (alphabetical).
    /// Issues within a type are sorted by path base name, ties keeping the
    /// full-path order of the underlying map.
    pub fn issues_in_tier(&self, tiers: &TierMap, tier: Tier) -> BTreeMap<String, Vec<&Issue>> {
        let mut grouped: BTreeMap<String, Vec<&Issue>> = BTreeMap::new();
        for issues in self.issues_by_file.values() {
            for issue in issues {
                if tiers.classify(&issue.issue_type, issue.severity) == tier {
                    grouped.entry(issue.issue_type.clone()).or_default().push(issue);
                }
            }
        }
        for issues in grouped.values_mut() {
            issues.sort_by(|a, b| a.base_name().cmp(b.base_name()));
        }
        grouped
    }

    /// Number of distinct files with at least one issue.
    pub fn file_count(&self) -> usize {
        self.issues_by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues_by_file.is_empty()
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
