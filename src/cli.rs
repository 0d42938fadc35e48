// src/cli.rs — Command-line surface

use clap::Parser;
use std::path::PathBuf;

/// Benchmark hosted LLMs on one document-summarization task: invoke each
/// candidate, grade it against nine rubrics, and compare cost, latency, and
/// quality.
#[derive(Parser, Debug)]
#[command(name = "summarena", version, about)]
pub struct Cli {
    /// Path to the extracted document text to summarize.
    pub document: PathBuf,

    /// Candidate model identifier (repeatable), e.g.
    /// anthropic.claude-3-haiku-20240307-v1:0
    #[arg(short, long = "model", required = true)]
    pub models: Vec<String>,

    /// Summarization task given to every candidate.
    #[arg(short, long, default_value = "Summarize this document in 2 sentences.")]
    pub task: String,

    /// Output-token cap for candidate invocations.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// AWS region for the Bedrock Runtime endpoint.
    #[arg(long)]
    pub region: Option<String>,

    /// AWS credential profile.
    #[arg(long)]
    pub profile: Option<String>,

    /// Directory for report files (defaults to the working directory).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
