// src/rubric/dynamic.rs — Run-specific Task Adherence rubric
//
// The ninth rubric is authored by the judge itself from the user's free-text
// task, once per run and before any candidate is invoked, so every candidate
// is graded against an identical rubric. Few-shot prompted with one worked
// criteria example (the generic "2 sentences" task) and one worked scale
// example (Tone Consistency).

use crate::grader::parser::parse_tag;
use crate::grader::Judge;
use crate::infra::errors::ArenaError;
use crate::rubric::{fixed_rubric, Dimension};

/// The generated criteria/scale pair. Created before the model loop, read
/// only afterwards, discarded at process exit.
#[derive(Debug, Clone)]
pub struct DynamicRubric {
    pub criteria: String,
    pub scale: String,
}

const EXAMPLE_CRITERIA: &str = "\
Task Adherence:
- Does the model's output contain a summary of the provided document?
- Is the summary contained within <summary></summary> XML tags?
- How many sentences does the summary consist of? Is it exactly 2? - pay extra attention to identifying and counting sentences accurately
- Does the model's output contain any additional text outside of the summary within the XML tags?";

/// Ask the judge to author the Task Adherence rubric for this run's task.
/// Exactly one blocking judge call.
pub async fn generate_dynamic_rubric(
    judge: &dyn Judge,
    task: &str,
) -> Result<DynamicRubric, ArenaError> {
    // Worked scale example borrowed from the fixed Tone Consistency rubric.
    let example_scale = fixed_rubric(Dimension::Tone)
        .map(|spec| spec.scale)
        .unwrap_or_default();

    let system_prompt = format!(
        "\
Your goal is to evaluate and compare an AI model's outputs/response
You will be evaluating a model based on how well it adhered to the provided task in the prompt (Task Adherence)
Only create your evaluation in regards to the tasks explicitly mentioned in the <provided_prompt>; other criteria ({exclusions}) will be evaluated in a different method.
Create an evaluation framework and a grading criteria for the provided task that will be used to assign a model a 0-5 score
Only provide the <evaluation_criteria> and <evaluation_grading> in your response
If the provided task requires a specific number of sentences, paragraphs, or pages, make sure the evaluation criteria involves counting that accuracy
When counting sentences, a sentence ends with a period (.), exclamation mark (!), or question mark (?); decimal points, colons, semi-colons, and commas are not sentence terminators.
Use the examples provided as a guide to the format
Be fair but critical in your assessment

This is the prompt/instructions that the models will be provided and that you will grade their adherence to
<provided_prompt>
{task}
</provided_prompt>

This is an example of an evaluation criteria that was for the prompt \"Summarize this document in 2 sentences. Return your summary in <summary></summary> xml tags. No other text\"
Use this example framework as a guide for the creation of an evaluation criteria for Task Adherence to the <provided_prompt>:
<example_evaluation_criteria>
{example_criteria}
</example_evaluation_criteria>

This is an example of a grading framework that was used for Tone Consistency. Use this example framework as a guide for the creation of a grading framework for Task Adherence to the <provided_prompt>:
<example_evaluation_grading>
{example_scale}
</example_evaluation_grading>

Return your evaluation criteria for Task Adherence in <evaluation_criteria> xml tags, with no other text
Return your grading framework for Task Adherence in <evaluation_grading> xml tags, with no other text
",
        exclusions = Dimension::Task.exclusion_list(),
        example_criteria = EXAMPLE_CRITERIA,
        example_scale = example_scale,
    );

    let user_prompt = format!(
        "\
This is the prompt/instructions that the models will be provided and that you will grade their adherence to
<provided_prompt>
{task}
</provided_prompt>
"
    );

    let reply = judge.complete(&system_prompt, &user_prompt).await?;

    let criteria = parse_tag(&reply, "evaluation_criteria");
    if criteria.is_empty() {
        return Err(ArenaError::MissingTag {
            tag: "evaluation_criteria".into(),
        });
    }
    let scale = parse_tag(&reply, "evaluation_grading");
    if scale.is_empty() {
        return Err(ArenaError::MissingTag {
            tag: "evaluation_grading".into(),
        });
    }

    tracing::debug!(task, "generated dynamic Task Adherence rubric");
    Ok(DynamicRubric { criteria, scale })
}
