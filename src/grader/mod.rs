// src/grader/mod.rs — LLM-graded rubric scoring

pub mod parser;

use async_trait::async_trait;
use serde_json::json;

use crate::infra::errors::ArenaError;
use crate::provider::bedrock::BedrockClient;
use crate::rubric::dynamic::DynamicRubric;
use crate::rubric::{fixed_rubric, Dimension};

/// The fixed reference judge. Deliberately distinct from, and not
/// configurable alongside, the candidate models under test, so every
/// candidate is graded by the same stable referee.
pub const JUDGE_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Seam over the scoring model. Production uses `BedrockJudge`; tests use a
/// deterministic canned judge.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Issue exactly one completion request and return the raw reply text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, ArenaError>;
}

/// Judge backed by the pinned Claude model on Bedrock, temperature 0.
pub struct BedrockJudge {
    client: BedrockClient,
}

impl BedrockJudge {
    pub fn new(client: BedrockClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Judge for BedrockJudge {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ArenaError> {
        let mut body = json!({
            "anthropic_version": "bedrock-2023-05-31",
            "max_tokens": 10000,
            "temperature": 0,
            "messages": [
                {
                    "role": "user",
                    "content": [{ "type": "text", "text": user_prompt }],
                }
            ],
        });
        if !system_prompt.is_empty() {
            body["system"] = json!(system_prompt);
        }

        let output = self.client.invoke_model(JUDGE_MODEL_ID, &body).await?;
        match output.body["content"][0]["text"].as_str() {
            Some(text) => Ok(text.to_string()),
            None => Err(ArenaError::Provider {
                provider: "bedrock".into(),
                message: "judge reply carried no text content".into(),
            }),
        }
    }
}

/// One grading call's reply. The score is carried as raw text; integer
/// conversion (and the 0-5 range check) happens at aggregation so that a
/// missing or garbled score tag fails loudly instead of scoring 0.
#[derive(Debug, Clone)]
pub struct GradeReply {
    pub dimension: Dimension,
    pub score_text: String,
    pub rationale: String,
}

pub struct Grader<'a> {
    judge: &'a dyn Judge,
}

impl<'a> Grader<'a> {
    pub fn new(judge: &'a dyn Judge) -> Self {
        Self { judge }
    }

    /// Grade one fixed dimension of a candidate summary. One network request.
    pub async fn grade(
        &self,
        dimension: Dimension,
        model_name: &str,
        summary: &str,
        source_text: &str,
    ) -> Result<GradeReply, ArenaError> {
        let spec = fixed_rubric(dimension).ok_or_else(|| {
            ArenaError::Config(format!("no fixed rubric for dimension '{dimension}'"))
        })?;

        let system_prompt = format!(
            "\
As an AI evaluator, you will be given a source body of text and an AI model's attempt to summarize that text.
Evaluate the AI's summarization of the <source_body> and provide a grade based on {title}
Evaluate the AI model's summary based on the provided <evaluation_criteria>
Only perform your evaluation of the model's summary using the provided <evaluation_criteria>; other criteria ({exclusions}) will be evaluated in a different method.
Respond with a score of 0-5 using the details in <evaluation_grading> as a guide

<evaluation_criteria>
{criteria}
</evaluation_criteria>

<evaluation_grading>
{scale}
</evaluation_grading>

The source body of text that the summaries are based off of:
<source_body>
{source_text}
</source_body>

Evaluate and determine a score for the model's {title}. Include the reasoning for your choice in your thoughts

Return your thought process for scoring in <thoughts> xml tags concisely
Return your score (0-5) in <score> xml tags
Make sure to only respond with a score of 0 through 5 for your response in <score>, no other text, only the numerical score
",
            title = dimension.title(),
            exclusions = dimension.exclusion_list(),
            criteria = spec.criteria,
            scale = spec.scale,
        );

        let user_prompt = candidate_block(model_name, summary);
        let reply = self.judge.complete(&system_prompt, &user_prompt).await?;
        Ok(parse_reply(dimension, &reply))
    }

    /// Grade the dynamic ninth dimension: adherence to the user's task,
    /// against the rubric generated at run start.
    pub async fn grade_task(
        &self,
        model_name: &str,
        summary: &str,
        source_text: &str,
        task: &str,
        rubric: &DynamicRubric,
    ) -> Result<GradeReply, ArenaError> {
        let system_prompt = format!(
            "\
As an AI evaluator, you will be provided the task/instructions that were given to an AI model, and the AI model's attempt to perform that task.
Evaluate how well the AI's summary followed the tasks in the <prompt_instructions> in the creation of the summary and provide a grade
Use the provided <evaluation_criteria> to evaluate the AI model's attempt at a summary
Only perform your evaluation based on how well the model followed the given tasks; other criteria ({exclusions}) will be evaluated in a different method.
Respond with a score of 0-5 using the details in <evaluation_grading> as a guide
Be fair but critical in your assessment

If asked to count the number of sentences or paragraphs, use the following rules:
- A sentence should end with a period (.), exclamation mark (!), or question mark (?).
- Decimal points (e.g., 1.5), colons (:), semi-colons (;), and commas (,) should not be considered as sentence terminators.

The task that was provided to the AI model:
<prompt_instructions>
{task}
</prompt_instructions>

<evaluation_criteria>
{criteria}
</evaluation_criteria>

<evaluation_grading>
{scale}
</evaluation_grading>

The AI model was given this body of text to operate on:
<source_body>
{source_text}
</source_body>

Evaluate and determine a score for the model's Adherence to the Task. Include the reasoning for your choice in your thoughts

Return your thought process for scoring in <thoughts> xml tags - thinking through each criteria with a critical eye
Return your score (0-5) in <score> xml tags
Make sure to only respond with a score of 0 through 5 for your response in <score>, no other text, only the numerical score
",
            exclusions = Dimension::Task.exclusion_list(),
            criteria = rubric.criteria,
            scale = rubric.scale,
        );

        let user_prompt = candidate_block(model_name, summary);
        let reply = self.judge.complete(&system_prompt, &user_prompt).await?;
        Ok(parse_reply(Dimension::Task, &reply))
    }
}

fn candidate_block(model_name: &str, summary: &str) -> String {
    format!(
        "\
<model>
{model_name}
</model>

model's summary to be evaluated:
<summary>
{summary}
</summary>
"
    )
}

fn parse_reply(dimension: Dimension, reply: &str) -> GradeReply {
    GradeReply {
        dimension,
        // An absent <score> tag yields "" here and fails integer conversion
        // downstream; it must never default to a valid score.
        score_text: parser::parse_tag(reply, "score"),
        rationale: parser::parse_tag(reply, "thoughts"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedJudge {
        reply: String,
        seen: std::sync::Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Judge for CannedJudge {
        async fn complete(
            &self,
            system_prompt: &str,
            user_prompt: &str,
        ) -> Result<String, ArenaError> {
            self.seen
                .lock()
                .unwrap()
                .push((system_prompt.into(), user_prompt.into()));
            Ok(self.reply.clone())
        }
    }

    fn judge(reply: &str) -> CannedJudge {
        CannedJudge {
            reply: reply.into(),
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn grade_embeds_rubric_and_exclusions() {
        let j = judge("<thoughts>fine</thoughts><score>4</score>");
        let grader = Grader::new(&j);
        let reply = grader
            .grade(Dimension::Accuracy, "model-x", "the summary", "the source")
            .await
            .unwrap();
        assert_eq!(reply.score_text, "4");
        assert_eq!(reply.rationale, "fine");

        let seen = j.seen.lock().unwrap();
        let (system, user) = &seen[0];
        assert!(system.contains("grade based on Accuracy"));
        assert!(system.contains("Completeness"), "exclusion list present");
        assert!(system.contains("<source_body>\nthe source"));
        assert!(user.contains("<summary>\nthe summary"));
        // The source body belongs to the system prompt, not the user turn.
        assert!(!user.contains("the source"));
    }

    #[tokio::test]
    async fn grade_task_embeds_dynamic_rubric() {
        let j = judge("<thoughts>counted 2 sentences</thoughts><score>5</score>");
        let grader = Grader::new(&j);
        let rubric = DynamicRubric {
            criteria: "Task Adherence:\n- exactly two sentences?".into(),
            scale: "5 - Excellent ... 0 - Unacceptable".into(),
        };
        let reply = grader
            .grade_task("model-x", "One. Two.", "src", "Summarize in 2 sentences.", &rubric)
            .await
            .unwrap();
        assert_eq!(reply.score_text, "5");

        let seen = j.seen.lock().unwrap();
        let (system, _) = &seen[0];
        assert!(system.contains("exactly two sentences?"));
        assert!(system.contains("Summarize in 2 sentences."));
        assert!(system.contains("Decimal points"));
    }

    #[tokio::test]
    async fn missing_score_tag_yields_empty_score_text() {
        let j = judge("<thoughts>no score given</thoughts>");
        let grader = Grader::new(&j);
        let reply = grader
            .grade(Dimension::Tone, "m", "s", "src")
            .await
            .unwrap();
        assert_eq!(reply.score_text, "");
    }
}
