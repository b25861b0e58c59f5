use anyhow::Context;

use olx_report::{
    Cli, IssueCollector, LineGrammarParser, OutputParser, ReportRenderer, TierMap, ToolRunner,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    match run(cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("olx-report: {err:#}");
            std::process::exit(2);
        }
    }
}

/// Run the wrapped tool, reformat its output, and hand back its exit code.
async fn run(cli: Cli) -> anyhow::Result<i32> {
    let base_path = std::env::current_dir().context("cannot determine working directory")?;

    let tool = ToolRunner::new().run().await?;

    let parser = LineGrammarParser::new();
    let mut collector = IssueCollector::new(base_path);
    for raw in parser.parse(&tool.stdout) {
        collector.add(raw);
    }

    let renderer = ReportRenderer::new(cli.use_colors());
    let report = renderer.render(&collector, &TierMap::standard(), cli.section_filter());
    println!("{report}");

    Ok(tool.exit_code)
}
