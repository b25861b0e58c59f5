//! Severity Tier Classification
//!
//! Re-buckets the wrapped tool's raw WARNING/ERROR labels into three ordered
//! report tiers. Known issue types are assigned a tier through an explicit
//! lookup table; everything else falls back to the raw severity label.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parser::RawSeverity;

/// Report tier for an issue, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Issues that affect grading or required course settings
    Major,
    /// Issues that degrade the course but do not break it
    Minor,
    /// Informational findings
    Fyi,
}

impl Tier {
    /// Section heading label used in the rendered report
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Major => "MAJOR",
            Tier::Minor => "MINOR",
            Tier::Fyi => "FYI",
        }
    }
}

/// Issue types that always classify as [`Tier::Major`], regardless of the
/// raw severity label the tool reported them with.
const MAJOR_TYPES: &[&str] = &[
    "GradingPolicyIssue", // affects grading
    "InvalidSetting",     // missing required course settings
    "PolicyNotFound",     // missing policy file
];

/// Issue types that always classify as [`Tier::Minor`].
const MINOR_TYPES: &[&str] = &[
    "MissingFile",        // missing static files
    "DateOrdering",       // date ordering issues
    "MissingDisplayName", // missing display names
    "UnexpectedTag",      // tag found in an inappropriate location
    "InvalidHTML",        // HTML syntax errors
];

/// Lookup table mapping issue-type names to report tiers.
///
/// Replaces global static membership lists: the table is plain data passed to
/// the renderer, so alternative bucketings can be supplied without touching
/// the classification logic. Types absent from the table classify by their
/// raw severity label (`ERROR` is major, `WARNING` is minor).
#[derive(Debug, Clone, Default)]
pub struct TierMap {
    overrides: HashMap<String, Tier>,
}

impl TierMap {
    /// Create an empty table; every issue classifies by raw severity alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with the standard edx-cleaner issue-type bucketing.
    pub fn standard() -> Self {
        let mut map = Self::new();
        for kind in MAJOR_TYPES {
            map.insert(kind, Tier::Major);
        }
        for kind in MINOR_TYPES {
            map.insert(kind, Tier::Minor);
        }
        map
    }

    /// Assign a tier to an issue type, replacing any previous assignment.
    pub fn insert(&mut self, issue_type: &str, tier: Tier) {
        self.overrides.insert(issue_type.to_string(), tier);
    }

    /// Look up the explicit tier for an issue type, if one is assigned.
    pub fn get(&self, issue_type: &str) -> Option<Tier> {
        self.overrides.get(issue_type).copied()
    }

    /// Classify an issue type reported with the given raw severity.
    ///
    /// Explicit table entries take precedence over the raw label; an
    /// unlisted type classifies as major when reported `ERROR` and minor
    /// when reported `WARNING`.
    pub fn classify(&self, issue_type: &str, severity: RawSeverity) -> Tier {
        if let Some(tier) = self.get(issue_type) {
            return tier;
        }
        match severity {
            RawSeverity::Error => Tier::Major,
            RawSeverity::Warning => Tier::Minor,
        }
    }
}
