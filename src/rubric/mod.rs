// src/rubric/mod.rs — The nine scoring dimensions
//
// Eight fixed rubrics plus the run-specific Task Adherence rubric generated
// in `dynamic`. The fixed rubrics are one data table consumed by a single
// parametrized grading prompt; each entry carries the criteria bullets and
// the 0-5 grading anchors for its dimension.

pub mod dynamic;

use std::fmt;

/// The nine dimensions in their fixed narrative/report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Completeness,
    Accuracy,
    Flow,
    Structure,
    Conciseness,
    Clarity,
    Objectivity,
    Tone,
    Task,
}

impl Dimension {
    pub const ALL: [Dimension; 9] = [
        Dimension::Completeness,
        Dimension::Accuracy,
        Dimension::Flow,
        Dimension::Structure,
        Dimension::Conciseness,
        Dimension::Clarity,
        Dimension::Objectivity,
        Dimension::Tone,
        Dimension::Task,
    ];

    pub const FIXED: [Dimension; 8] = [
        Dimension::Completeness,
        Dimension::Accuracy,
        Dimension::Flow,
        Dimension::Structure,
        Dimension::Conciseness,
        Dimension::Clarity,
        Dimension::Objectivity,
        Dimension::Tone,
    ];

    /// Stable key used in score maps and CSV columns.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Completeness => "completeness",
            Dimension::Accuracy => "accuracy",
            Dimension::Flow => "flow",
            Dimension::Structure => "structure",
            Dimension::Conciseness => "conciseness",
            Dimension::Clarity => "clarity",
            Dimension::Objectivity => "objectivity",
            Dimension::Tone => "tone",
            Dimension::Task => "task",
        }
    }

    /// Human title used in grading prompts and narratives.
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Completeness => "Completeness",
            Dimension::Accuracy => "Accuracy",
            Dimension::Flow => "Logical Flow",
            Dimension::Structure => "Paragraph and Sentence Structure",
            Dimension::Conciseness => "Conciseness",
            Dimension::Clarity => "Clarity",
            Dimension::Objectivity => "Objectivity",
            Dimension::Tone => "Tone Consistency",
            Dimension::Task => "Task Adherence",
        }
    }

    /// The literal exclusion list embedded in the grading prompt: every
    /// other dimension this call must ignore. Task excludes all eight fixed
    /// dimensions; a fixed dimension excludes the other seven plus Task.
    pub fn exclusion_list(&self) -> String {
        let others: Vec<&str> = Dimension::ALL
            .iter()
            .filter(|d| *d != self)
            .map(|d| d.title())
            .collect();
        match others.split_last() {
            Some((last, rest)) => format!("{}, and {}", rest.join(", "), last),
            None => String::new(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One fixed rubric: criteria bullets plus the six grading anchors.
pub struct RubricSpec {
    pub dimension: Dimension,
    pub criteria: &'static str,
    pub scale: &'static str,
}

pub fn fixed_rubric(dimension: Dimension) -> Option<&'static RubricSpec> {
    FIXED_RUBRICS.iter().find(|r| r.dimension == dimension)
}

pub static FIXED_RUBRICS: [RubricSpec; 8] = [
    RubricSpec {
        dimension: Dimension::Completeness,
        criteria: "\
1. Completeness:
   - How well does the summary cover all the main points, key ideas, and essential information from the source text.
   - Does the summary capture all critical information or important details from the source text.
   - How well does the summary provide a comprehensive overview of the source text, capturing its essence and main themes.",
        scale: "\
5 - Excellent:
Completeness: The summary covers all relevant aspects of the topic in an exhaustive and comprehensive manner, leaving no significant gaps and addressing even nuanced aspects of the subject matter.

4 - Very Good:
Completeness: The summary covers the vast majority of relevant aspects. It may not delve into every minute detail but provides a thorough, well-rounded understanding of the subject matter.

3 - Good:
Completeness: The summary covers the main points and essential aspects but may lack depth or overlook certain secondary or ancillary aspects of the subject matter.

2 - Fair:
Completeness: The summary addresses some relevant aspects but leaves out significant portions or key elements; coverage is partial or incomplete.

1 - Poor:
Completeness: The summary provides only superficial or cursory coverage, leaving out most relevant aspects or details.

0 - Unacceptable:
Completeness: The summary fails to address the topic adequately, leaving out information essential for a complete understanding.",
    },
    RubricSpec {
        dimension: Dimension::Accuracy,
        criteria: "\
1. Accuracy:
   - How well did the summary accurately represent the key information, facts, and details present in the source text.
   - Are there contradictions or factual errors in the summary when compared to the source text.
   - Does the summary include any misleading or inaccurate information that is not supported by the source text.
   - Are the numerical data, proper nouns, and other specific details from the source text accurately represented in the summary.",
        scale: "\
5 - Excellent:
Accuracy: The summary accurately captures the key points and factual information from the source text without any errors or misrepresentations.

4 - Very Good:
Accuracy: The summary is highly accurate, with only minor inaccuracies that do not significantly impact the overall meaning.

3 - Good:
Accuracy: The summary is generally accurate, but there are a few noticeable inaccuracies or misrepresentations that may slightly distort the meaning.

2 - Fair:
Accuracy: The summary contains several inaccuracies or misrepresentations that distort the meaning of the source text to a moderate extent.

1 - Poor:
Accuracy: The summary is riddled with inaccuracies and misrepresentations, significantly distorting the meaning of the source text.

0 - Unacceptable:
Accuracy: The summary is completely inaccurate and bears no resemblance to the source text, misrepresenting the information entirely.",
    },
    RubricSpec {
        dimension: Dimension::Flow,
        criteria: "\
1. Logical Flow:
   - Does the summary present information in a logical, coherent, and easy-to-follow manner?
   - Is there a clear progression of ideas, with smooth transitions between points?
   - Does the organization of the summary mirror the structure and flow of the source text?
   - Is there a natural, intuitive flow that aids comprehension and maintains the intended meaning of the original text?",
        scale: "\
5 - Excellent:
Logical Flow: The summary follows an exceptionally logical and coherent structure, mirroring the organization of the source text. Transitions are seamless and the flow of information is natural and easy to follow.

4 - Very Good:
Logical Flow: The summary maintains a largely logical and coherent flow. A few minor abrupt transitions or slight deviations from the original order of ideas may exist, but the overall flow is smooth.

3 - Good:
Logical Flow: The summary generally follows a logical progression, with occasional lapses or disruptions. Some transitions may be abrupt or the organization may deviate slightly from the source text's structure.

2 - Fair:
Logical Flow: The summary exhibits a somewhat disjointed or inconsistent flow, with noticeable breaks in the progression of ideas, making the intended narrative harder to follow.

1 - Poor:
Logical Flow: The summary lacks a clear logical flow, presenting information in a haphazard manner with abrupt or nonexistent transitions, impeding comprehension.

0 - Unacceptable:
Logical Flow: The summary fails to establish any discernible logical flow or coherent progression of ideas, rendering it difficult or impossible to follow.",
    },
    RubricSpec {
        dimension: Dimension::Structure,
        criteria: "\
1. Paragraph and Sentence Structure:
   - How well-structured and organized are the paragraphs in the summary?
   - Do the paragraphs flow logically and coherently, with clear transitions between ideas?
   - Are the sentences within each paragraph well-constructed, concise, and easy to understand?
   - Is there appropriate use of varied sentence structures (simple, compound, complex) to enhance readability and flow?
   - Are there any issues with run-on sentences, fragmented sentences, or awkward phrasing that hinder clarity?",
        scale: "\
5 - Excellent:
Paragraph and Sentence Structure: Paragraphs are clearly delineated and flow seamlessly; sentences are well-crafted and concise with effective use of varied structures. The writing is polished and error-free.

4 - Very Good:
Paragraph and Sentence Structure: Paragraphs are well-structured with appropriate transitions; sentences are generally clear and well-constructed with occasional minor issues. The writing is mostly error-free.

3 - Good:
Paragraph and Sentence Structure: Paragraphs are reasonably well-structured though transitions could be improved; some sentences lack conciseness or clarity. Minor errors or awkward phrasing may be present but do not significantly impede understanding.

2 - Fair:
Paragraph and Sentence Structure: Paragraphs are loosely structured with inconsistent transitions; sentences are often unclear, wordy, or convoluted, with limited structural variation and noticeable errors.

1 - Poor:
Paragraph and Sentence Structure: Paragraphs lack coherence; sentences are frequently unclear, run-on, or fragmented, significantly impeding understanding. Numerous errors or awkward phrasing are present.

0 - Unacceptable:
Paragraph and Sentence Structure: No discernible paragraph organization or proper sentence structure; the text is unintelligible and riddled with errors.",
    },
    RubricSpec {
        dimension: Dimension::Conciseness,
        criteria: "\
1. Conciseness:
   - How effectively does the summary capture the main ideas and key information from the source text in a concise manner?
   - Is the summary free from unnecessary details, repetition, or irrelevant information?
   - Does the summary avoid wordiness and convey the essential points clearly and succinctly?
   - Is the length of the summary appropriate for the content, neither too long nor too short?
   - Does the summary strike a balance between being concise and retaining the necessary context and nuance?",
        scale: "\
5 - Excellent:
Conciseness: The summary is highly effective at eliminating unnecessary detail, repetition, and irrelevant information. The writing is succinct, the length appropriate, and the balance between brevity and nuance excellent.

4 - Very Good:
Conciseness: The summary is proficient at avoiding unnecessary detail and wordiness, conveying the essential points clearly with only minor deviations in length or balance.

3 - Good:
Conciseness: The summary is reasonably effective though minor instances of unnecessary detail or wordiness are present; length is mostly appropriate with some deviations.

2 - Fair:
Conciseness: The summary has difficulty avoiding unnecessary detail and repetition; the writing is often wordy and the balance between brevity and context suffers.

1 - Poor:
Conciseness: The summary is overwhelmed by unnecessary detail, repetition, and irrelevant information; the writing is excessively wordy and the length inappropriate for the content.

0 - Unacceptable:
Conciseness: The summary lacks any semblance of conciseness; excessive repetition and irrelevant information render it meaningless.",
    },
    RubricSpec {
        dimension: Dimension::Clarity,
        criteria: "\
1. Clarity and Comprehensibility:
   - How easy is it to understand the key ideas and information presented in the summary?
   - Is the language used clear, concise, and free from ambiguity or confusing phrasing?
   - Does the summary convey the main points from the source text without introducing confusion or misinterpretation?
   - Are complex concepts or technical terms explained in a way that is easy for the target audience to comprehend?
   - Is the summary free from unnecessary jargon or overly complex language that could hinder understanding?",
        scale: "\
5 - Excellent Clarity:
The summary is exceptionally clear; language is precise and free from ambiguity, complex concepts are accessible, and no unnecessary jargon is present.

4 - Very Good Clarity:
The language is generally clear and concise with only minor instances of ambiguity; complex concepts are mostly well-explained.

3 - Good Clarity:
The language is generally clear although some ambiguous or confusing phrasing could be improved; some points risk misinterpretation and some jargon may hinder understanding.

2 - Fair Clarity:
The language is often unclear or ambiguous with multiple instances of confusing phrasing; complex concepts are insufficiently explained and jargon impedes comprehension.

1 - Poor Clarity:
The language is frequently unclear, ambiguous, or confusing; the summary fails to convey the core information and is riddled with jargon.

0 - Unacceptable Clarity:
The language is incomprehensible; the summary fails to convey the main ideas at all, rendering it meaningless or unrelated to the original content.",
    },
    RubricSpec {
        dimension: Dimension::Objectivity,
        criteria: "\
Objectivity:
- Does the summary present information objectively, without introducing personal biases, opinions, or judgments not present in the source text?
- Are subjective statements or claims in the source text accurately represented, without exaggeration or diminishment?
- Is the language neutral and impartial, avoiding loaded or emotionally charged words that could influence the reader's perception?
- If the source text presents multiple perspectives, does the summary represent them fairly and accurately, without favoring or dismissing any particular stance?
- Are any factual errors or misrepresentations of information from the source text present in the summary?",
        scale: "\
5 - Excellent:
Objectivity: The summary is entirely objective and impartial, accurately reflecting content, tone, and any multiple perspectives without bias; language is neutral and factual with no misrepresentations.

4 - Very Good:
Objectivity: The summary maintains a high degree of objectivity; minor instances of slightly loaded language or slight favoring of one perspective do not significantly impact neutrality.

3 - Good:
Objectivity: The summary is generally objective but shows occasional subjective language or noticeable favoring of one viewpoint; minor misrepresentations may exist.

2 - Fair:
Objectivity: The summary displays frequent subjective language and biases not present in the source text; one viewpoint is clearly favored and some factual errors affect accuracy.

1 - Poor:
Objectivity: The summary is highly subjective and biased, with significant personal opinion or exaggeration; perspectives are misrepresented and numerous factual errors distort the content.

0 - Unacceptable:
Objectivity: The summary is entirely subjective and opinionated, bearing little resemblance to the factual content of the source text.",
    },
    RubricSpec {
        dimension: Dimension::Tone,
        criteria: "\
1. Tone Consistency:
   - Is the overall tone of the summary consistent with the source text?
   - Does the summary maintain a similar level of formality, emotion, or attitude as the original content?
   - Are there any shifts in tone within the summary that seem out of place or inconsistent?
   - Does the summary capture the intended tone and mood conveyed in the source text?
   - If the source text has a neutral or objective tone, does the summary maintain that impartial perspective?
   - If the source text has a more subjective or emotional tone, does the summary reflect it without exaggeration or understatement?",
        scale: "\
5 - Excellent:
Tone Consistency: The summary maintains the source text's level of formality, emotion, and attitude throughout, with no shifts or inconsistencies; neutral sources stay impartial and subjective sources are conveyed without exaggeration.

4 - Very Good:
Tone Consistency: The tone is largely maintained with only minor deviations that do not significantly impact the intended mood; any slight shifts are not out of place.

3 - Good:
Tone Consistency: The tone is reasonably maintained though a few noticeable deviations or shifts exist; they do not significantly detract from the intended mood.

2 - Fair:
Tone Consistency: The tone is inconsistently maintained with frequent out-of-place shifts; neutral sources often drift subjective, subjective ones are exaggerated or understated.

1 - Poor:
Tone Consistency: The tone is rarely maintained, with significant deviations throughout that seem out of place or inappropriate.

0 - Unacceptable:
Tone Consistency: No discernible consistency with the source text's tone; constant shifts make it impossible to establish a coherent tone.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nine_dimensions_in_declared_order() {
        let keys: Vec<&str> = Dimension::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(
            keys,
            vec![
                "completeness",
                "accuracy",
                "flow",
                "structure",
                "conciseness",
                "clarity",
                "objectivity",
                "tone",
                "task"
            ]
        );
    }

    #[test]
    fn every_fixed_dimension_has_a_rubric() {
        for d in Dimension::FIXED {
            let spec = fixed_rubric(d).unwrap();
            assert!(spec.criteria.contains(':'));
            assert!(spec.scale.contains("5 - Excellent"));
            assert!(spec.scale.contains("0 - Unacceptable"));
        }
        assert!(fixed_rubric(Dimension::Task).is_none());
    }

    #[test]
    fn exclusion_list_names_exactly_the_other_dimensions() {
        let list = Dimension::Accuracy.exclusion_list();
        assert!(!list.contains("Accuracy"));
        for d in Dimension::ALL.iter().filter(|d| **d != Dimension::Accuracy) {
            assert!(list.contains(d.title()), "missing {} in {list}", d.title());
        }
        assert!(list.contains(", and "));

        // Task excludes all eight fixed dimensions.
        let task_list = Dimension::Task.exclusion_list();
        for d in Dimension::FIXED {
            assert!(task_list.contains(d.title()));
        }
    }
}
