// src/provider/families.rs — Per-family request/response mapping
//
// Each Bedrock vendor family takes a different request body and reports its
// token counts in a different spot: Anthropic/Meta/Amazon embed them in the
// JSON body, Mistral/Cohere/AI21 only report them in the
// x-amzn-bedrock-*-token-count response headers.

use async_trait::async_trait;
use serde_json::json;

use super::bedrock::{BedrockClient, InvokeOutput};
use super::{Invocation, ModelFamily, SummaryInvoker};
use crate::infra::errors::ArenaError;

/// Production invoker: maps (family, task, document) onto the family's wire
/// format and drives it through the Bedrock Runtime.
pub struct BedrockInvoker {
    client: BedrockClient,
}

impl BedrockInvoker {
    pub fn new(client: BedrockClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SummaryInvoker for BedrockInvoker {
    async fn invoke(
        &self,
        family: ModelFamily,
        model_id: &str,
        task_prompt: &str,
        document_text: &str,
        max_tokens: u32,
    ) -> Result<Invocation, ArenaError> {
        tracing::info!(model_id, family = family.name(), "invoking candidate model");
        let body = build_request(family, task_prompt, document_text, max_tokens);
        let output = self.client.invoke_model(model_id, &body).await?;
        parse_response(family, model_id, &output)
    }
}

/// Build the family-specific request body. Anthropic wraps the prompt in
/// Human/Assistant role markers; the other families concatenate a raw
/// `<context>` block after the task.
pub fn build_request(
    family: ModelFamily,
    task_prompt: &str,
    document_text: &str,
    max_tokens: u32,
) -> serde_json::Value {
    match family {
        ModelFamily::Anthropic => {
            let prompt = format!(
                "Human: \n\n {task_prompt} \n\n <context>{document_text}</context> \n Assistant: \n\n"
            );
            json!({
                "anthropic_version": "bedrock-2023-05-31",
                "max_tokens": max_tokens,
                "messages": [
                    {
                        "role": "user",
                        "content": [{ "type": "text", "text": prompt }],
                    }
                ],
            })
        }
        ModelFamily::Meta => json!({
            "prompt": contextual_prompt(task_prompt, document_text),
            "max_gen_len": max_tokens,
            "temperature": 0.5,
            "top_p": 0.5,
        }),
        ModelFamily::Mistral => json!({
            "prompt": contextual_prompt(task_prompt, document_text),
            "max_tokens": max_tokens,
            "temperature": 0,
            "top_k": 200,
            "top_p": 0.5,
        }),
        ModelFamily::Cohere => json!({
            "prompt": contextual_prompt(task_prompt, document_text),
            "max_tokens": max_tokens,
            "temperature": 0.5,
        }),
        ModelFamily::Amazon => json!({
            "inputText": contextual_prompt(task_prompt, document_text),
            "textGenerationConfig": {
                "maxTokenCount": max_tokens,
                "stopSequences": [],
                "temperature": 0.5,
                "topP": 0.5,
            },
        }),
        ModelFamily::Ai21 => json!({
            "prompt": contextual_prompt(task_prompt, document_text),
            "maxTokens": max_tokens,
            "temperature": 0.5,
            "topP": 0.5,
            "stopSequences": [],
        }),
    }
}

fn contextual_prompt(task_prompt: &str, document_text: &str) -> String {
    format!("{task_prompt} \n\n <context>{document_text}</context>")
}

/// Extract (output text, token counts) from the family-specific response
/// location. A missing field is a provider error, not a silent zero.
pub fn parse_response(
    family: ModelFamily,
    model_id: &str,
    output: &InvokeOutput,
) -> Result<Invocation, ArenaError> {
    let body = &output.body;
    let (text, input_tokens, output_tokens) = match family {
        ModelFamily::Anthropic => (
            body["content"][0]["text"].as_str(),
            body["usage"]["input_tokens"].as_u64(),
            body["usage"]["output_tokens"].as_u64(),
        ),
        ModelFamily::Meta => (
            body["generation"].as_str(),
            body["prompt_token_count"].as_u64(),
            body["generation_token_count"].as_u64(),
        ),
        ModelFamily::Mistral => (
            body["outputs"][0]["text"].as_str(),
            output.header_input_tokens,
            output.header_output_tokens,
        ),
        ModelFamily::Cohere => (
            body["generations"][0]["text"].as_str(),
            output.header_input_tokens,
            output.header_output_tokens,
        ),
        ModelFamily::Amazon => (
            body["results"][0]["outputText"].as_str(),
            body["inputTextTokenCount"].as_u64(),
            body["results"][0]["tokenCount"].as_u64(),
        ),
        ModelFamily::Ai21 => (
            body["completions"][0]["data"]["text"].as_str(),
            output.header_input_tokens,
            output.header_output_tokens,
        ),
    };

    match (text, input_tokens, output_tokens) {
        (Some(text), Some(input_tokens), Some(output_tokens)) => Ok(Invocation {
            output_text: text.to_string(),
            input_tokens,
            output_tokens,
        }),
        _ => Err(ArenaError::Provider {
            provider: family.name().into(),
            message: format!("malformed response from {model_id}: missing text or token counts"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn output(body: serde_json::Value) -> InvokeOutput {
        InvokeOutput {
            body,
            header_input_tokens: None,
            header_output_tokens: None,
        }
    }

    #[test]
    fn anthropic_request_uses_messages_api() {
        let body = build_request(ModelFamily::Anthropic, "Summarize.", "DOC", 4096);
        assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(body["max_tokens"], 4096);
        let text = body["messages"][0]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Human:"));
        assert!(text.contains("<context>DOC</context>"));
    }

    #[test]
    fn titan_request_nests_generation_config() {
        let body = build_request(ModelFamily::Amazon, "Summarize.", "DOC", 512);
        assert_eq!(body["textGenerationConfig"]["maxTokenCount"], 512);
        assert!(body["inputText"].as_str().unwrap().contains("<context>DOC</context>"));
    }

    #[test]
    fn anthropic_response_reads_body_usage() {
        let inv = parse_response(
            ModelFamily::Anthropic,
            "anthropic.claude-v2",
            &output(json!({
                "content": [{ "text": "a summary" }],
                "usage": { "input_tokens": 120, "output_tokens": 30 },
            })),
        )
        .unwrap();
        assert_eq!(inv.output_text, "a summary");
        assert_eq!(inv.input_tokens, 120);
        assert_eq!(inv.output_tokens, 30);
    }

    #[test]
    fn mistral_response_reads_token_headers() {
        let inv = parse_response(
            ModelFamily::Mistral,
            "mistral.mistral-7b-instruct-v0:2",
            &InvokeOutput {
                body: json!({ "outputs": [{ "text": "out" }] }),
                header_input_tokens: Some(77),
                header_output_tokens: Some(11),
            },
        )
        .unwrap();
        assert_eq!(inv.output_text, "out");
        assert_eq!(inv.input_tokens, 77);
        assert_eq!(inv.output_tokens, 11);
    }

    #[test]
    fn missing_token_counts_are_an_error() {
        let err = parse_response(
            ModelFamily::Cohere,
            "cohere.command-text-v14",
            &output(json!({ "generations": [{ "text": "out" }] })),
        )
        .unwrap_err();
        assert!(matches!(err, ArenaError::Provider { .. }));
    }
}
