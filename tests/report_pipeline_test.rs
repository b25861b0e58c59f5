//! End-to-end tests for the wrapper pipeline: raw tool output through the
//! line parser, collector, and renderer.

use std::fs;

use tempfile::TempDir;

use olx_report::{
    IssueCollector, LineGrammarParser, OutputParser, RawSeverity, ReportRenderer, SectionFilter,
    Tier, TierMap,
};

const SAMPLE_OUTPUT: &str = "\
Loading policy files...
ERROR GradingPolicyIssue (policy.json): missing grade_cutoffs
WARNING MissingFile (course/html/about.xml): tag with url_name='about' points to a missing file
WARNING DateOrdering (course/chapter/week2.xml): start date after end date
ERROR UnexpectedTag (course/vertical/intro.xml): chapter tag inside vertical
Done.
";

fn collect(base: &TempDir, output: &str) -> IssueCollector {
    let parser = LineGrammarParser::new();
    let mut collector = IssueCollector::new(base.path());
    for raw in parser.parse(output) {
        collector.add(raw);
    }
    collector
}

#[test]
fn test_non_matching_lines_are_ignored() {
    let temp = TempDir::new().unwrap();
    let collector = collect(&temp, SAMPLE_OUTPUT);
    let total: usize = collector.issues_by_file().values().map(Vec::len).sum();
    assert_eq!(total, 4);
}

#[test]
fn test_policy_issue_is_major_and_resolved_under_policies() {
    let temp = TempDir::new().unwrap();
    let run_dir = temp.path().join("policies/2026");
    fs::create_dir_all(&run_dir).unwrap();
    fs::write(run_dir.join("policy.json"), "{}").unwrap();

    let collector = collect(&temp, SAMPLE_OUTPUT);
    let tiers = TierMap::standard();

    let major = collector.issues_in_tier(&tiers, Tier::Major);
    let policy_issues = &major["GradingPolicyIssue"];
    assert_eq!(policy_issues.len(), 1);
    assert_eq!(policy_issues[0].severity, RawSeverity::Error);
    assert_eq!(policy_issues[0].file_path, run_dir.join("policy.json"));
    assert_eq!(policy_issues[0].message, "missing grade_cutoffs");
}

#[test]
fn test_listed_type_overrides_raw_severity() {
    let temp = TempDir::new().unwrap();
    let collector = collect(&temp, SAMPLE_OUTPUT);
    let tiers = TierMap::standard();

    // UnexpectedTag is explicitly minor even though the tool says ERROR.
    let minor = collector.issues_in_tier(&tiers, Tier::Minor);
    assert!(minor.contains_key("UnexpectedTag"));
    assert!(minor.contains_key("DateOrdering"));
    assert!(!collector.issues_in_tier(&tiers, Tier::Major).contains_key("UnexpectedTag"));
}

#[test]
fn test_missing_file_issue_gets_html_source_annotation() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("html")).unwrap();
    fs::write(temp.path().join("html/about.html"), "<p>About</p>").unwrap();

    let collector = collect(&temp, SAMPLE_OUTPUT);
    let tiers = TierMap::standard();
    let minor = collector.issues_in_tier(&tiers, Tier::Minor);
    let missing = &minor["MissingFile"][0];
    assert!(missing.extra_info.starts_with(" [HTML source:"));
    assert!(missing.extra_info.contains("about.html"));
}

#[test]
fn test_full_report_layout() {
    let temp = TempDir::new().unwrap();
    let collector = collect(&temp, SAMPLE_OUTPUT);
    let renderer = ReportRenderer::new(false);
    let report = renderer.render(&collector, &TierMap::standard(), SectionFilter::all());

    assert!(report.contains("===== EDX CLEANER REPORT ====="));
    assert!(report.contains("🔴 MAJOR ISSUES"));
    assert!(report.contains("🟡 MINOR ISSUES"));
    assert!(report.contains("🔵 FYI ISSUES"));
    assert!(report.contains("No informational issues found."));
    assert!(report.contains("▶ GradingPolicyIssue"));
    assert!(report.contains("❌ missing grade_cutoffs"));
    assert!(report.contains("⚠️ start date after end date"));
    assert!(report.contains("🔴 Major issues: 1"));
    assert!(report.contains("🟡 Minor issues: 3"));
    assert!(report.contains("🔵 FYI: 0"));
    assert!(report.contains("Total files with issues: 4"));
}

#[test]
fn test_major_only_report_suppresses_other_sections() {
    let temp = TempDir::new().unwrap();
    let collector = collect(&temp, SAMPLE_OUTPUT);
    let renderer = ReportRenderer::new(false);
    let filter = SectionFilter {
        major: true,
        minor: false,
        fyi: false,
    };
    let report = renderer.render(&collector, &TierMap::standard(), filter);

    assert!(report.contains("MAJOR ISSUES"));
    assert!(!report.contains("MINOR ISSUES"));
    assert!(!report.contains("FYI ISSUES"));
    assert!(report.contains("🟡 Minor issues: 0"));
    // The file total is over every collected issue, filtered or not.
    assert!(report.contains("Total files with issues: 4"));
}

#[test]
fn test_fyi_tier_via_override() {
    let temp = TempDir::new().unwrap();
    let collector = collect(&temp, SAMPLE_OUTPUT);
    let mut tiers = TierMap::standard();
    tiers.insert("DateOrdering", Tier::Fyi);

    let renderer = ReportRenderer::new(false);
    let report = renderer.render(&collector, &tiers, SectionFilter::all());
    assert!(report.contains("🔵 FYI: 1"));
    assert!(report.contains("🟡 Minor issues: 2"));
}

#[test]
fn test_clean_run_renders_placeholders_only() {
    let temp = TempDir::new().unwrap();
    let collector = collect(&temp, "All checks passed.\n");
    let renderer = ReportRenderer::new(false);
    let report = renderer.render(&collector, &TierMap::standard(), SectionFilter::all());

    assert!(report.contains("No major issues found."));
    assert!(report.contains("No minor issues found."));
    assert!(report.contains("No informational issues found."));
    assert!(report.contains("Total files with issues: 0"));
}
