// src/eval.rs — Per-model evaluation orchestration
//
// Fans one (model, summary) pair out to the nine grading calls concurrently
// and folds the replies into a ScoreCard. The join is fail-fast: the first
// grading failure aborts the evaluation and the remaining replies are
// discarded. There is no partial credit; one unparseable score fails the
// whole ScoreCard.

use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;

use crate::grader::{GradeReply, Grader, Judge};
use crate::infra::errors::ArenaError;
use crate::rubric::dynamic::DynamicRubric;
use crate::rubric::Dimension;

/// One graded dimension with its validated integer score.
#[derive(Debug, Clone)]
pub struct RubricResult {
    pub dimension: Dimension,
    /// 0-5 inclusive.
    pub score: u8,
    pub rationale: String,
}

/// The nine RubricResults for one candidate model plus their aggregate.
#[derive(Debug, Clone)]
pub struct ScoreCard {
    pub model: String,
    /// In the declared dimension order.
    pub results: Vec<RubricResult>,
    /// Arithmetic mean of the nine integer scores; exact, never rounded.
    pub aggregate: f64,
    /// Candidate summary followed by each dimension's score and rationale.
    pub narrative: String,
}

impl ScoreCard {
    /// (dimension key, score) pairs in the declared order, for charting.
    pub fn score_map(&self) -> Vec<(&'static str, u8)> {
        self.results
            .iter()
            .map(|r| (r.dimension.key(), r.score))
            .collect()
    }

    pub fn score_for(&self, dimension: Dimension) -> Option<u8> {
        self.results
            .iter()
            .find(|r| r.dimension == dimension)
            .map(|r| r.score)
    }
}

const DIVIDER: &str =
    "---------------------------------------------------------------------";

/// Grade one candidate summary on all nine dimensions, concurrently.
pub async fn evaluate(
    judge: &dyn Judge,
    source_text: &str,
    model_name: &str,
    summary: &str,
    task: &str,
    rubric: &DynamicRubric,
) -> Result<ScoreCard, ArenaError> {
    let grader = Grader::new(judge);

    // All nine requests go in flight at once; completion order does not
    // matter because try_join_all preserves dispatch order in its output.
    let mut calls: Vec<BoxFuture<'_, Result<GradeReply, ArenaError>>> = Dimension::FIXED
        .iter()
        .map(|d| grader.grade(*d, model_name, summary, source_text).boxed())
        .collect();
    calls.push(
        grader
            .grade_task(model_name, summary, source_text, task, rubric)
            .boxed(),
    );
    let replies: Vec<GradeReply> = try_join_all(calls).await?;

    let results: Vec<RubricResult> = replies
        .into_iter()
        .map(|reply| {
            let score = convert_score(reply.dimension, &reply.score_text)?;
            Ok(RubricResult {
                dimension: reply.dimension,
                score,
                rationale: reply.rationale,
            })
        })
        .collect::<Result<_, ArenaError>>()?;

    let aggregate = results.iter().map(|r| r.score as u32).sum::<u32>() as f64 / 9.0;
    let narrative = build_narrative(summary, &results);

    Ok(ScoreCard {
        model: model_name.to_string(),
        results,
        aggregate,
        narrative,
    })
}

/// Convert a raw score string to a validated 0-5 integer. Empty or garbled
/// text raises; it is never coerced to 0.
fn convert_score(dimension: Dimension, raw: &str) -> Result<u8, ArenaError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|s| *s <= 5)
        .ok_or_else(|| ArenaError::ScoreParse {
            dimension: dimension.title().into(),
            raw: raw.into(),
        })
}

fn build_narrative(summary: &str, results: &[RubricResult]) -> String {
    let mut narrative = format!("Full Summary:\n{summary}\n{DIVIDER}\n");
    for r in results {
        narrative.push_str(&format!(
            "\n{}:\nScore: {}\nSummary: {}\n{DIVIDER}\n",
            r.dimension.title(),
            r.score,
            r.rationale
        ));
    }
    narrative
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    /// Deterministic judge that scores every dimension from a fixed list, in
    /// the order calls arrive.
    struct SequenceJudge {
        replies: std::sync::Mutex<Vec<String>>,
    }

    impl SequenceJudge {
        fn scoring(scores: &[&str]) -> Self {
            Self {
                replies: std::sync::Mutex::new(
                    scores
                        .iter()
                        .map(|s| format!("<thoughts>because</thoughts><score>{s}</score>"))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl Judge for SequenceJudge {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, ArenaError> {
            let mut replies = self.replies.lock().unwrap();
            Ok(replies.remove(0))
        }
    }

    fn rubric() -> DynamicRubric {
        DynamicRubric {
            criteria: "Task Adherence: did it follow the task?".into(),
            scale: "5 best, 0 worst".into(),
        }
    }

    #[tokio::test]
    async fn aggregate_is_exact_unrounded_mean() {
        let judge = SequenceJudge::scoring(&["5", "5", "5", "5", "5", "5", "5", "5", "4"]);
        let card = evaluate(&judge, "src", "model-x", "summary", "task", &rubric())
            .await
            .unwrap();
        assert_eq!(card.aggregate, 44.0 / 9.0);
        assert_eq!(card.model, "model-x");
    }

    #[tokio::test]
    async fn score_map_keys_match_declared_dimensions() {
        let judge = SequenceJudge::scoring(&["3", "3", "3", "3", "3", "3", "3", "3", "3"]);
        let card = evaluate(&judge, "src", "m", "s", "t", &rubric())
            .await
            .unwrap();
        let keys: Vec<&str> = card.score_map().iter().map(|(k, _)| *k).collect();
        let expected: Vec<&str> = Dimension::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(keys, expected);
    }

    #[tokio::test]
    async fn narrative_leads_with_summary_and_orders_dimensions() {
        let judge = SequenceJudge::scoring(&["1", "2", "3", "4", "5", "0", "1", "2", "3"]);
        let card = evaluate(&judge, "src", "m", "the candidate summary", "t", &rubric())
            .await
            .unwrap();
        assert!(card.narrative.starts_with("Full Summary:\nthe candidate summary"));
        let completeness = card.narrative.find("Completeness:").unwrap();
        let accuracy = card.narrative.find("Accuracy:").unwrap();
        let task = card.narrative.find("Task Adherence:").unwrap();
        assert!(completeness < accuracy && accuracy < task);
    }

    #[tokio::test]
    async fn unparseable_score_fails_the_whole_evaluation() {
        let judge = SequenceJudge::scoring(&["5", "5", "N/A", "5", "5", "5", "5", "5", "5"]);
        let err = evaluate(&judge, "src", "m", "s", "t", &rubric())
            .await
            .unwrap_err();
        assert!(matches!(err, ArenaError::ScoreParse { .. }));
    }

    #[tokio::test]
    async fn out_of_range_score_fails() {
        let judge = SequenceJudge::scoring(&["5", "5", "6", "5", "5", "5", "5", "5", "5"]);
        let err = evaluate(&judge, "src", "m", "s", "t", &rubric())
            .await
            .unwrap_err();
        assert!(matches!(err, ArenaError::ScoreParse { ref raw, .. } if raw == "6"));
    }

    #[test]
    fn convert_score_rejects_empty_string() {
        assert!(convert_score(Dimension::Accuracy, "").is_err());
        assert!(convert_score(Dimension::Accuracy, "  4 ").is_ok());
    }
}
