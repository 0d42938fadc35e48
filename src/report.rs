// src/report.rs — Report assembly and persistence
//
// Renders the collected rows as delimited tabular text (consumed both by the
// meta-evaluation prompt and the persisted CSV), formats the per-model
// narratives, and writes one timestamped file per report.

use std::path::{Path, PathBuf};

use crate::eval::ScoreCard;
use crate::infra::errors::ArenaError;
use crate::runner::RunRow;
use crate::rubric::Dimension;

/// CSV header for the performance table. "Total Cost(1000)" is the cost of
/// 1000 invocations; unknown models price at zero, which under-reports cost
/// rather than erroring.
const ROW_COLUMNS: &str = "Model,Time Length,Character Count,Char Process Time,\
Input Cost,Output Cost,Total Cost,Total Cost(1000),Summary Score,Invoke Response";

/// Render the run rows as CSV text.
pub fn render_rows_csv(rows: &[RunRow]) -> String {
    let mut csv = String::from(ROW_COLUMNS);
    csv.push('\n');
    for row in rows {
        csv.push_str(&format!(
            "{},{:.2},{},{:.2},{:.8},{:.8},{:.6},{:.6},{:.4},{}\n",
            csv_escape(&row.model),
            row.latency_secs,
            row.character_count,
            row.chars_per_second,
            row.input_cost,
            row.output_cost,
            row.total_cost,
            row.total_cost_per_1000,
            row.score,
            csv_escape(&row.output_text),
        ));
    }
    csv
}

/// Render per-dimension scores as CSV, one row per model, for charting
/// consumers.
pub fn render_scorecards_csv(scorecards: &[ScoreCard]) -> String {
    let mut csv = String::from("model_name");
    for d in Dimension::ALL {
        csv.push(',');
        csv.push_str(d.key());
    }
    csv.push('\n');

    for card in scorecards {
        csv.push_str(&csv_escape(&card.model));
        for (_, score) in card.score_map() {
            csv.push_str(&format!(",{score}"));
        }
        csv.push('\n');
    }
    csv
}

/// Per-model block of the run narrative.
pub fn model_narrative(card: &ScoreCard) -> String {
    format!(
        "\nThe final summary for {} is:\n\n{}\n",
        card.model, card.narrative
    )
}

/// The fixed analytical prompt for the cost/latency/quality meta-evaluation.
/// Best summary result is the highest score; lowest cost only decides the
/// least-expensive criterion, never "best".
pub fn build_performance_prompt(rows_csv: &str) -> String {
    format!(
        "\
Given the following CSV data on AI model performance:

{rows_csv}

Please analyze the data and determine which model has the best performance in terms of cost efficiency and speed.

'Total Cost(1000)' is the total cost in dollars for invoking the model 1000 times.
'Time Length' is the time to invoke the model.
'Summary Score' is the invoke response quality score.

Criteria for evaluation:
1) The model with the lowest 'Total Cost(1000)' is considered as least expensive.
2) The model with the highest 'Total Cost(1000)' is considered as most expensive.
3) The model with the shortest 'Time Length' is considered as fastest.
4) The model with the highest 'Summary Score' is considered as best summary result.
5) The model with the lowest 'Summary Score' is considered as worst summary result.

Note that unknown models are priced at zero, so a zero cost may mean the price table has no entry rather than a free model.

Summarize your findings on which model performs best on each criterion and overall. Identify the percent time and cost difference.

Format in markdown.
"
    )
}

/// Write one timestamped report file; returns the written path.
pub fn write_report(dir: &Path, eval_name: &str, contents: &str) -> Result<PathBuf, ArenaError> {
    std::fs::create_dir_all(dir)?;
    let stamp = chrono::Local::now().format("%d%m%Y%H%M%S");
    let path = dir.join(format!("{eval_name}-evaluation_results-{stamp}.txt"));
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Write the performance comparison table next to the narrative reports.
pub fn write_rows_csv(dir: &Path, rows: &[RunRow]) -> Result<PathBuf, ArenaError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("model_performance_comparison.csv");
    std::fs::write(&path, render_rows_csv(rows))?;
    Ok(path)
}

/// Write the per-dimension score table for charting consumers.
pub fn write_scorecards_csv(dir: &Path, scorecards: &[ScoreCard]) -> Result<PathBuf, ArenaError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("model_rubric_scores.csv");
    std::fs::write(&path, render_scorecards_csv(scorecards))?;
    Ok(path)
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::RubricResult;
    use pretty_assertions::assert_eq;

    fn row() -> RunRow {
        RunRow {
            model: "amazon.titan-text-lite-v1".into(),
            latency_secs: 1.5,
            character_count: 300,
            chars_per_second: 200.0,
            input_cost: 0.0003,
            output_cost: 0.0004,
            total_cost: 0.0007,
            total_cost_per_1000: 0.7,
            score: 4.0,
            output_text: "A summary, with a comma.".into(),
        }
    }

    fn card(model: &str) -> ScoreCard {
        let results = Dimension::ALL
            .iter()
            .map(|d| RubricResult {
                dimension: *d,
                score: 3,
                rationale: "ok".into(),
            })
            .collect();
        ScoreCard {
            model: model.into(),
            results,
            aggregate: 3.0,
            narrative: "Full Summary:\n...".into(),
        }
    }

    #[test]
    fn rows_csv_has_header_and_quotes_free_text() {
        let csv = render_rows_csv(&[row()]);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), ROW_COLUMNS);
        let data = lines.next().unwrap();
        assert!(data.starts_with("amazon.titan-text-lite-v1,1.50,300,200.00,"));
        assert!(data.ends_with("\"A summary, with a comma.\""));
    }

    #[test]
    fn scorecards_csv_columns_follow_declared_order() {
        let csv = render_scorecards_csv(&[card("m1")]);
        assert_eq!(
            csv.lines().next().unwrap(),
            "model_name,completeness,accuracy,flow,structure,conciseness,clarity,objectivity,tone,task"
        );
        assert_eq!(csv.lines().nth(1).unwrap(), "m1,3,3,3,3,3,3,3,3,3");
    }

    #[test]
    fn performance_prompt_embeds_table_and_criteria() {
        let prompt = build_performance_prompt("Model,Score\nm,4");
        assert!(prompt.contains("Model,Score\nm,4"));
        assert!(prompt.contains("highest 'Summary Score' is considered as best"));
    }

    #[test]
    fn reports_are_written_with_timestamped_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), "summary", "contents").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("summary-evaluation_results-"));
        assert!(name.ends_with(".txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "contents");
    }

    #[test]
    fn csv_escape_doubles_quotes() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a \"b\" c"), "\"a \"\"b\"\" c\"");
    }
}
