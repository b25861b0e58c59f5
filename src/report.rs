//! Report Rendering
//!
//! Turns a populated [`IssueCollector`] into the human-readable report:
//! a fixed header, one section per admitted severity tier (issue types
//! alphabetical, issues ordered by path base name), and a summary with
//! per-tier counts and the number of distinct files touched. Colors are ANSI
//! escapes gated on a flag; the emoji decorations are unconditional. There is
//! no machine-readable mode.

use crate::collector::{Issue, IssueCollector};
use crate::severity::{Tier, TierMap};

const SECTION_RULE: &str = "==================================================";
const TYPE_RULE: &str = "----------------------------------------";

/// Which tier sections the report should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFilter {
    pub major: bool,
    pub minor: bool,
    pub fyi: bool,
}

impl SectionFilter {
    /// Show every section.
    pub fn all() -> Self {
        Self {
            major: true,
            minor: true,
            fyi: true,
        }
    }

    pub fn shows(&self, tier: Tier) -> bool {
        match tier {
            Tier::Major => self.major,
            Tier::Minor => self.minor,
            Tier::Fyi => self.fyi,
        }
    }
}

impl Default for SectionFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Renderer for the tiered issue report.
pub struct ReportRenderer {
    use_colors: bool,
}

impl ReportRenderer {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn tier_color(tier: Tier) -> &'static str {
        match tier {
            Tier::Major => "91",
            Tier::Minor => "93",
            Tier::Fyi => "94",
        }
    }

    fn tier_dot(tier: Tier) -> &'static str {
        match tier {
            Tier::Major => "🔴",
            Tier::Minor => "🟡",
            Tier::Fyi => "🔵",
        }
    }

    fn tier_icon(tier: Tier) -> &'static str {
        match tier {
            Tier::Major => "❌",
            Tier::Minor => "⚠️",
            Tier::Fyi => "ℹ️",
        }
    }

    fn empty_placeholder(tier: Tier) -> &'static str {
        match tier {
            Tier::Major => "  No major issues found.",
            Tier::Minor => "  No minor issues found.",
            Tier::Fyi => "  No informational issues found.",
        }
    }

    /// Render the full report for the collected issues.
    pub fn render(
        &self,
        collector: &IssueCollector,
        tiers: &TierMap,
        filter: SectionFilter,
    ) -> String {
        let mut output = String::new();
        output.push_str(&self.format_header());

        let mut counts = [0usize; 3];
        for (i, tier) in [Tier::Major, Tier::Minor, Tier::Fyi].into_iter().enumerate() {
            if filter.shows(tier) {
                counts[i] = self.render_section(&mut output, collector, tiers, tier);
            }
        }

        output.push_str(&self.format_summary(counts[0], counts[1], counts[2], collector.file_count()));
        output
    }

    fn format_header(&self) -> String {
        format!("\n{}\n", self.colorize("===== EDX CLEANER REPORT =====", "1"))
    }

    /// Render one tier section into `output`, returning its issue count.
    fn render_section(
        &self,
        output: &mut String,
        collector: &IssueCollector,
        tiers: &TierMap,
        tier: Tier,
    ) -> usize {
        output.push_str(&self.format_section_header(tier));

        let grouped = collector.issues_in_tier(tiers, tier);
        if grouped.is_empty() {
            output.push_str(Self::empty_placeholder(tier));
            output.push('\n');
            return 0;
        }

        let mut count = 0;
        for (issue_type, issues) in &grouped {
            output.push_str(&self.format_type_header(issue_type, issues.len(), tier));
            for issue in issues {
                count += 1;
                output.push_str(&self.format_issue(issue, tier));
            }
        }
        count
    }

    fn format_section_header(&self, tier: Tier) -> String {
        let heading = format!("{} {} ISSUES", Self::tier_dot(tier), tier.label());
        format!(
            "\n{}\n{}\n",
            self.colorize(&heading, Self::tier_color(tier)),
            SECTION_RULE
        )
    }

    fn format_type_header(&self, issue_type: &str, count: usize, tier: Tier) -> String {
        let heading = format!("▶ {}", issue_type);
        format!(
            "\n{} ({} issues)\n{}\n",
            self.colorize(&heading, Self::tier_color(tier)),
            count,
            TYPE_RULE
        )
    }

    fn format_issue(&self, issue: &Issue, tier: Tier) -> String {
        format!(
            "  📄 {}:\n    {} {}{}\n",
            issue.file_path.display(),
            Self::tier_icon(tier),
            issue.message,
            issue.extra_info
        )
    }

    fn format_summary(
        &self,
        major_count: usize,
        minor_count: usize,
        fyi_count: usize,
        total_files: usize,
    ) -> String {
        format!(
            "\n{}\n{}\n{}\n{}\nTotal files with issues: {}\n",
            self.colorize("===== SUMMARY =====", "1"),
            self.colorize(&format!("🔴 Major issues: {}", major_count), "91"),
            self.colorize(&format!("🟡 Minor issues: {}", minor_count), "93"),
            self.colorize(&format!("🔵 FYI: {}", fyi_count), "94"),
            total_files
        )
    }
}
