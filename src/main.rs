// src/main.rs — summarena entry point

use clap::Parser;

use summarena::cli::Cli;
use summarena::grader::BedrockJudge;
use summarena::infra::config::{AwsCredentials, RunConfig};
use summarena::infra::logger;
use summarena::provider::bedrock::BedrockClient;
use summarena::provider::families::BedrockInvoker;
use summarena::report;
use summarena::runner::Runner;

#[tokio::main]
async fn main() {
    // Respects RUST_LOG / SUMMARENA_LOG via EnvFilter
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RunConfig::resolve(cli.region, cli.profile, cli.max_tokens, cli.output_dir)?;
    let credentials = AwsCredentials::resolve(&config.profile)?;

    let invoker = BedrockInvoker::new(BedrockClient::new(&config, credentials.clone()));
    let judge = BedrockJudge::new(BedrockClient::new(&config, credentials));

    let runner = Runner::new(&config, &invoker, &judge);
    let outcome = runner.run(&cli.document, &cli.models, &cli.task).await?;

    if outcome.rows.is_empty() {
        tracing::warn!("no candidate model produced a row; nothing to report");
        return Ok(());
    }

    let table_path = report::write_rows_csv(&config.output_dir, &outcome.rows)?;
    let scores_path = report::write_scorecards_csv(&config.output_dir, &outcome.scorecards)?;
    let summary_path = report::write_report(&config.output_dir, "summary", &outcome.narrative)?;
    let cost_path = report::write_report(&config.output_dir, "cost", &outcome.cost_narrative)?;

    println!("{}", report::render_rows_csv(&outcome.rows));
    println!("{}", outcome.cost_narrative);
    println!("\nreports written:");
    for path in [table_path, scores_path, summary_path, cost_path] {
        println!("  {}", path.display());
    }

    Ok(())
}
