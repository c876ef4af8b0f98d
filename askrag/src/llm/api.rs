use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{AskError, Result},
    llm::completer::Completer,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: Option<u64>,
}

/// Handle to an OpenAI-compatible chat completion endpoint.
///
/// Build it once at startup and share it; cloning is cheap and reuses the
/// same HTTP connection pool.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl std::fmt::Debug for LlmApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmApiClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_config = ApiConfig::from_llm_config(config);

        let (provider, _) = parse_llm_provider_model(&config.model);
        let needs_api_key = !matches!(provider.to_lowercase().as_str(), "ollama" | "lmstudio");

        if needs_api_key && api_config.api_key.is_none() {
            return Err(AskError::Config(
                "OPENAI_API_KEY is required for this provider".to_string(),
            ));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_config.api_key.clone().unwrap_or_default());

        let mut client = Client::with_config(openai_config);

        if let Some(timeout_secs) = api_config.timeout_secs {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .map_err(|error| {
                    AskError::Config(format!("Failed to create LLM HTTP client: {error}"))
                })?;

            // async-openai retries transient failures on its own; keep that
            // inside the same time budget as a single request.
            let backoff = backoff::ExponentialBackoff {
                max_elapsed_time: Some(Duration::from_secs(timeout_secs)),
                ..Default::default()
            };

            client = client.with_http_client(http_client).with_backoff(backoff);
        }

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|error| AskError::Validation(format!("Invalid user prompt: {error}")))?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .messages(messages)
            .build()
            .map_err(|error| {
                AskError::Validation(format!("Invalid LLM completion request: {error}"))
            })
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(AskError::EmptyResponse)?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl Completer for LlmApiClient {
    async fn get_completion(&self, prompt: &str) -> Result<String> {
        if prompt.is_empty() {
            return Err(AskError::Validation("Prompt cannot be empty".to_string()));
        }

        let request = self.build_request(prompt)?;

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending LLM completion request"
        );

        let response = self.client.chat().create(request).await?;
        let content = Self::extract_content(response)?;

        tracing::debug!(response_len = content.len(), "LLM completion received");

        Ok(content)
    }
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        Self {
            base_url,
            api_key: config.api_key.clone(),
            model: model.to_string(),
            timeout_secs: config.timeout_secs,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}
