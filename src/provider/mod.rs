// src/provider/mod.rs — Candidate-model invocation layer

pub mod bedrock;
pub mod families;

use async_trait::async_trait;

use crate::infra::errors::ArenaError;

/// Closed set of vendor families hosted on Bedrock that this harness can
/// drive. Selected by exact-prefix parsing of the model identifier, never by
/// substring containment, so "anthropics.x" cannot accidentally match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Anthropic,
    Meta,
    Mistral,
    Cohere,
    Amazon,
    Ai21,
}

impl ModelFamily {
    /// Parse the family from the segment before the first `.` of a Bedrock
    /// model identifier. Unknown prefixes return `None` and the caller skips
    /// the model.
    pub fn parse(model_id: &str) -> Option<Self> {
        let prefix = model_id.split_once('.')?.0;
        match prefix {
            "anthropic" => Some(Self::Anthropic),
            "meta" => Some(Self::Meta),
            "mistral" => Some(Self::Mistral),
            "cohere" => Some(Self::Cohere),
            "amazon" => Some(Self::Amazon),
            "ai21" => Some(Self::Ai21),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Meta => "meta",
            Self::Mistral => "mistral",
            Self::Cohere => "cohere",
            Self::Amazon => "amazon",
            Self::Ai21 => "ai21",
        }
    }
}

/// Embedding-only model families cannot produce a summary and are excluded
/// from the run before family dispatch.
pub fn is_text_model(model_id: &str) -> bool {
    !model_id.contains("embed")
}

/// One candidate summarization call: output text plus the vendor-reported
/// token counts that pricing consumes.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub output_text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Seam between the run orchestrator and the wire adapters. Production code
/// uses `families::BedrockInvoker`; tests substitute a canned mock.
#[async_trait]
pub trait SummaryInvoker: Send + Sync {
    async fn invoke(
        &self,
        family: ModelFamily,
        model_id: &str,
        task_prompt: &str,
        document_text: &str,
        max_tokens: u32,
    ) -> Result<Invocation, ArenaError>;
}
