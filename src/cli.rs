use clap::Parser;

use crate::report::SectionFilter;

/// Severity-tiered report formatter for edx-cleaner output
#[derive(Parser, Debug, Clone)]
#[command(name = "olx-report")]
#[command(about = "Run edx-cleaner and re-bucket its findings into MAJOR/MINOR/FYI tiers")]
#[command(version)]
pub struct Cli {
    /// Show only major issues
    #[arg(long = "major-only", help = "Show only major issues")]
    pub major_only: bool,

    /// Show only minor issues
    #[arg(long = "minor-only", help = "Show only minor issues")]
    pub minor_only: bool,

    /// Show only informational issues
    #[arg(long = "fyi-only", help = "Show only FYI issues")]
    pub fyi_only: bool,

    /// Disable ANSI color codes (emoji remain)
    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Section filter derived from the `--*-only` flags.
    ///
    /// Combinations are permissive: each flag suppresses the *other* tiers,
    /// so two flags together show both of their sections.
    pub fn section_filter(&self) -> SectionFilter {
        SectionFilter {
            major: !self.minor_only && !self.fyi_only,
            minor: !self.major_only && !self.fyi_only,
            fyi: !self.major_only && !self.minor_only,
        }
    }

    /// Colors are on for a terminal unless explicitly disabled.
    pub fn use_colors(&self) -> bool {
        !self.no_color && atty::is(atty::Stream::Stdout)
    }
}
