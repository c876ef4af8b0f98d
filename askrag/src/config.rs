use std::env;

pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    /// Model used to judge completions; falls back to `llm.model`.
    pub eval_model: Option<String>,
}

/// LLM configuration for chat/completion models
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Request timeout. `None` keeps the HTTP client's own default.
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                model: non_empty_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                api_key: non_empty_env("OPENAI_API_KEY"),
                base_url: non_empty_env("LLM_BASE_URL"),
                timeout_secs: parse_env_opt("LLM_TIMEOUT"),
            },
            eval_model: non_empty_env("EVAL_MODEL"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Configuration for the evaluation judge: the main LLM settings with the
    /// model swapped for `eval_model` when one is set.
    pub fn judge_config(&self) -> LlmConfig {
        let mut judge = self.llm.clone();
        if let Some(model) = &self.eval_model {
            judge.model = model.clone();
        }
        judge
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
///
/// A bare model name such as `gpt-3.5-turbo` is treated as an OpenAI model.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    ("openai", model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LLM_MODEL",
        "OPENAI_API_KEY",
        "LLM_BASE_URL",
        "LLM_TIMEOUT",
        "EVAL_MODEL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_llm_config_defaults() {
        clear_env();

        let config = Config::default();
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert!(config.llm.api_key.is_none());
        assert!(config.llm.base_url.is_none());
        assert!(config.llm.timeout_secs.is_none());
        assert!(config.eval_model.is_none());
    }

    #[test]
    #[serial]
    fn test_llm_config_from_env() {
        clear_env();
        env::set_var("LLM_MODEL", "openrouter/openai/gpt-4o-mini");
        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("LLM_BASE_URL", "https://example.test/v1");
        env::set_var("LLM_TIMEOUT", "45");

        let config = Config::from_env();
        assert_eq!(config.llm.model, "openrouter/openai/gpt-4o-mini");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.base_url.as_deref(), Some("https://example.test/v1"));
        assert_eq!(config.llm.timeout_secs, Some(45));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_api_key_is_treated_as_missing() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "   ");

        let config = Config::from_env();
        assert!(config.llm.api_key.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_is_ignored() {
        clear_env();
        env::set_var("LLM_TIMEOUT", "soon");

        let config = Config::from_env();
        assert!(config.llm.timeout_secs.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_judge_config_uses_eval_model() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("EVAL_MODEL", "gpt-4o");

        let config = Config::from_env();
        let judge = config.judge_config();
        assert_eq!(judge.model, "gpt-4o");
        assert_eq!(judge.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.model, "gpt-3.5-turbo");

        clear_env();
    }

    #[test]
    fn test_parse_llm_provider_model() {
        assert_eq!(parse_llm_provider_model("gpt-3.5-turbo"), ("openai", "gpt-3.5-turbo"));
        assert_eq!(parse_llm_provider_model("ollama/llama3.2"), ("ollama", "llama3.2"));
        assert_eq!(
            parse_llm_provider_model("openrouter/anthropic/claude-3.5-sonnet"),
            ("openrouter", "anthropic/claude-3.5-sonnet")
        );
        assert_eq!(
            parse_llm_provider_model("unknown/model-name"),
            ("openai", "unknown/model-name")
        );
    }
}
