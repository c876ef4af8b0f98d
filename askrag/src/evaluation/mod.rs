//! LLM-judged quality checks for completions
//!
//! Each metric renders a judge prompt, a judge [`Completer`] scores it with a
//! JSON verdict, and the score is compared against the metric's threshold:
//! - Hallucination: share of unsupported claims, passes when at or below threshold
//! - Answer Relevancy: how directly the response answers the prompt
//! - Contextual Relevancy: how relevant the supplied context is to the prompt

mod metrics;
pub mod prompts;

pub use metrics::{AnswerRelevancyMetric, ContextualRelevancyMetric, HallucinationMetric};

use serde::{Deserialize, Serialize};

use crate::error::{AskError, Result};
use crate::llm::Completer;

/// A quality check scored by a judge model.
pub trait Metric: Send + Sync {
    fn name(&self) -> &'static str;

    fn threshold(&self) -> f32;

    /// Prompt sent to the judge for this metric's inputs.
    fn judge_prompt(&self) -> String;

    fn is_successful(&self, score: f32) -> bool {
        score >= self.threshold()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub name: String,
    pub score: f32,
    pub threshold: f32,
    pub success: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub results: Vec<MetricResult>,
    /// True only when every metric passed.
    pub success: bool,
}

impl std::fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Evaluation: {}", if self.success { "PASSED" } else { "FAILED" })?;
        for result in &self.results {
            writeln!(
                f,
                "  [{}] {}: {:.2} (threshold {:.2}) - {}",
                if result.success { "pass" } else { "fail" },
                result.name,
                result.score,
                result.threshold,
                result.reason
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct JudgeVerdict {
    score: f32,
    #[serde(default)]
    reason: String,
}

/// Score a single metric with `judge`.
pub async fn measure(judge: &dyn Completer, metric: &dyn Metric) -> Result<MetricResult> {
    let reply = judge.get_completion(&metric.judge_prompt()).await?;
    let verdict = parse_verdict(&reply)?;

    let score = verdict.score.clamp(0.0, 1.0);
    let success = metric.is_successful(score);

    tracing::info!(
        metric = metric.name(),
        score,
        threshold = metric.threshold(),
        success,
        "Metric evaluated"
    );

    Ok(MetricResult {
        name: metric.name().to_string(),
        score,
        threshold: metric.threshold(),
        success,
        reason: verdict.reason,
    })
}

/// Run every metric in order and aggregate the outcome.
pub async fn evaluate(judge: &dyn Completer, metrics: &[&dyn Metric]) -> Result<EvaluationResult> {
    let mut results = Vec::with_capacity(metrics.len());

    for metric in metrics {
        results.push(measure(judge, *metric).await?);
    }

    let success = results.iter().all(|result| result.success);

    Ok(EvaluationResult { results, success })
}

fn parse_verdict(reply: &str) -> Result<JudgeVerdict> {
    let body = strip_code_fence(reply);

    let verdict: JudgeVerdict = serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            response_len = reply.len(),
            response_preview = %reply.chars().take(100).collect::<String>(),
            error = %e,
            "Failed to parse judge verdict"
        );
        AskError::Evaluation(format!("Failed to parse judge verdict: {e}"))
    })?;

    if !verdict.score.is_finite() {
        return Err(AskError::Evaluation(
            "Judge verdict score is not a finite number".to_string(),
        ));
    }

    Ok(verdict)
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
