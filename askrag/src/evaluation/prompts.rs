//! Judge prompts for the evaluation metrics
//!
//! Every prompt asks for the same JSON verdict shape:
//! `{"score": <0.0-1.0>, "reason": "..."}`.

const VERDICT_FORMAT: &str = r#"Respond with valid JSON only, in this format:
{"score": 0.0, "reason": "one sentence explaining the score"}"#;

/// Prompt asking how much of `response` is unsupported or contradicted.
///
/// With no contexts the judge checks the response against well-established
/// general knowledge instead.
pub fn hallucination_prompt(input: &str, response: &str, contexts: &[String]) -> String {
    let reference = if contexts.is_empty() {
        "No reference context was provided. Judge the response against well-established general knowledge.".to_string()
    } else {
        contexts
            .iter()
            .enumerate()
            .map(|(i, context)| format!("[{}] {context}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are grading an AI response for hallucination.
Estimate the fraction of claims in the response that are unsupported by or contradict the reference.

Score:
- 0.0: every claim is supported
- 1.0: the response is entirely fabricated or contradicts the reference

Reference:
{reference}

Input:
{input}

Response:
{response}

{VERDICT_FORMAT}"#
    )
}

/// Prompt asking how directly `response` answers `input`.
pub fn answer_relevancy_prompt(input: &str, response: &str) -> String {
    format!(
        r#"You are grading an AI response for answer relevancy.
Estimate the fraction of statements in the response that directly address the input.

Score:
- 1.0: the response fully and only addresses the input
- 0.0: the response is unrelated to the input

Input:
{input}

Response:
{response}

{VERDICT_FORMAT}"#
    )
}

/// Prompt asking how relevant `context` is for answering `input`.
pub fn contextual_relevancy_prompt(input: &str, response: &str, context: &str) -> String {
    format!(
        r#"You are grading the retrieval context used to answer a question.
Estimate the fraction of the context that is relevant to answering the input.

Score:
- 1.0: all of the context is relevant to the input
- 0.0: none of the context is relevant to the input

Input:
{input}

Context:
{context}

Response produced from this context:
{response}

{VERDICT_FORMAT}"#
    )
}
