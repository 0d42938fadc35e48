// src/runner.rs — Whole-run orchestration
//
// Drives one evaluation batch: generate the dynamic rubric once, then walk
// the candidate list strictly sequentially — model i's summarization, nine
// grades, and pricing all finish before model i+1 begins. Only the nine
// rubric calls inside one model's evaluation run concurrently, which bounds
// peak network load to nine requests and keeps each model's measured latency
// isolated to its own summarization call.
//
// Nothing here retries and nothing times out; any failure bubbles out and
// halts the run with no partial report.

use std::path::Path;
use std::time::Instant;

use crate::eval::{evaluate, ScoreCard};
use crate::extract::extract_text;
use crate::grader::Judge;
use crate::infra::config::RunConfig;
use crate::infra::errors::ArenaError;
use crate::pricing::price;
use crate::provider::{is_text_model, ModelFamily, SummaryInvoker};
use crate::report::{build_performance_prompt, model_narrative, render_rows_csv};
use crate::rubric::dynamic::generate_dynamic_rubric;

/// Sub-measurable call durations are clamped to this before the chars/second
/// division.
const MIN_LATENCY_SECS: f64 = 1e-6;

/// One model's full cost/latency/quality record for a single run.
#[derive(Debug, Clone)]
pub struct RunRow {
    pub model: String,
    pub latency_secs: f64,
    pub character_count: usize,
    pub chars_per_second: f64,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub total_cost_per_1000: f64,
    /// The ScoreCard aggregate.
    pub score: f64,
    /// Raw candidate output.
    pub output_text: String,
}

#[derive(Debug)]
pub struct RunOutcome {
    /// One row per evaluated model, in input order minus skipped models.
    pub rows: Vec<RunRow>,
    /// Concatenated per-model evaluation narratives.
    pub narrative: String,
    /// Judge-written cost/speed/quality comparison of the rows.
    pub cost_narrative: String,
    pub scorecards: Vec<ScoreCard>,
}

pub struct Runner<'a> {
    config: &'a RunConfig,
    invoker: &'a dyn SummaryInvoker,
    judge: &'a dyn Judge,
}

impl<'a> Runner<'a> {
    pub fn new(
        config: &'a RunConfig,
        invoker: &'a dyn SummaryInvoker,
        judge: &'a dyn Judge,
    ) -> Self {
        Self {
            config,
            invoker,
            judge,
        }
    }

    pub async fn run(
        &self,
        document_path: &Path,
        models: &[String],
        task: &str,
    ) -> Result<RunOutcome, ArenaError> {
        let source_text = extract_text(document_path)?;
        self.run_over_text(&source_text, models, task).await
    }

    pub async fn run_over_text(
        &self,
        source_text: &str,
        models: &[String],
        task: &str,
    ) -> Result<RunOutcome, ArenaError> {
        // Characters, not UTF-8 bytes; multibyte text must not inflate the
        // count or the chars/second rate.
        let character_count = source_text.chars().count();

        // One rubric for the whole run, authored before any candidate is
        // invoked so every model is graded against identical criteria.
        let rubric = generate_dynamic_rubric(self.judge, task).await?;

        let mut rows = Vec::new();
        let mut scorecards = Vec::new();
        let mut narrative = String::new();

        for model in models {
            if !is_text_model(model) {
                tracing::info!(model, "skipping non-text model family");
                continue;
            }
            let Some(family) = ModelFamily::parse(model) else {
                tracing::warn!(model, "no adapter family matches this identifier, skipping");
                continue;
            };

            // Latency covers the summarization call only, not grading.
            let start = Instant::now();
            let invocation = self
                .invoker
                .invoke(
                    family,
                    model,
                    task,
                    source_text,
                    self.config.max_output_tokens,
                )
                .await?;
            let latency_secs = start.elapsed().as_secs_f64();
            let chars_per_second = character_count as f64 / latency_secs.max(MIN_LATENCY_SECS);

            let breakdown = price(invocation.input_tokens, invocation.output_tokens, model);

            let card = evaluate(
                self.judge,
                source_text,
                model,
                &invocation.output_text,
                task,
                &rubric,
            )
            .await?;

            tracing::info!(
                model,
                score = card.aggregate,
                latency_secs,
                total_cost = breakdown.total_cost,
                "model evaluated"
            );

            narrative.push_str(&model_narrative(&card));
            rows.push(RunRow {
                model: model.clone(),
                latency_secs,
                character_count,
                chars_per_second,
                input_cost: breakdown.input_cost,
                output_cost: breakdown.output_cost,
                total_cost: breakdown.total_cost,
                total_cost_per_1000: breakdown.total_cost_per_1000,
                score: card.aggregate,
                output_text: invocation.output_text,
            });
            scorecards.push(card);
        }

        let rows_csv = render_rows_csv(&rows);
        let cost_narrative = self
            .judge
            .complete("", &build_performance_prompt(&rows_csv))
            .await?;

        Ok(RunOutcome {
            rows,
            narrative,
            cost_narrative,
            scorecards,
        })
    }
}
