use crate::evaluation::{prompts, Metric};

/// Fraction of the response that is unsupported by the reference; lower is better.
#[derive(Debug, Clone)]
pub struct HallucinationMetric {
    pub threshold: f32,
    pub prompt: String,
    pub response: String,
    pub contexts: Vec<String>,
}

impl HallucinationMetric {
    pub fn new(threshold: f32, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            threshold,
            prompt: prompt.into(),
            response: response.into(),
            contexts: Vec::new(),
        }
    }

    pub fn with_contexts(mut self, contexts: Vec<String>) -> Self {
        self.contexts = contexts;
        self
    }
}

impl Metric for HallucinationMetric {
    fn name(&self) -> &'static str {
        "Hallucination"
    }

    fn threshold(&self) -> f32 {
        self.threshold
    }

    fn judge_prompt(&self) -> String {
        prompts::hallucination_prompt(&self.prompt, &self.response, &self.contexts)
    }

    fn is_successful(&self, score: f32) -> bool {
        score <= self.threshold
    }
}

#[derive(Debug, Clone)]
pub struct AnswerRelevancyMetric {
    pub threshold: f32,
    pub prompt: String,
    pub response: String,
}

impl AnswerRelevancyMetric {
    pub fn new(threshold: f32, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            threshold,
            prompt: prompt.into(),
            response: response.into(),
        }
    }
}

impl Metric for AnswerRelevancyMetric {
    fn name(&self) -> &'static str {
        "Answer Relevancy"
    }

    fn threshold(&self) -> f32 {
        self.threshold
    }

    fn judge_prompt(&self) -> String {
        prompts::answer_relevancy_prompt(&self.prompt, &self.response)
    }
}

#[derive(Debug, Clone)]
pub struct ContextualRelevancyMetric {
    pub threshold: f32,
    pub prompt: String,
    pub response: String,
    pub context: String,
}

impl ContextualRelevancyMetric {
    pub fn new(
        threshold: f32,
        prompt: impl Into<String>,
        response: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            threshold,
            prompt: prompt.into(),
            response: response.into(),
            context: context.into(),
        }
    }
}

impl Metric for ContextualRelevancyMetric {
    fn name(&self) -> &'static str {
        "Contextual Relevancy"
    }

    fn threshold(&self) -> f32 {
        self.threshold
    }

    fn judge_prompt(&self) -> String {
        prompts::contextual_relevancy_prompt(&self.prompt, &self.response, &self.context)
    }
}
