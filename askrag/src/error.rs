use async_openai::error::{ApiError, OpenAIError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AskError {
    /// Failure raised by the completion API client, passed through untouched.
    #[error(transparent)]
    Api(#[from] OpenAIError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM response contained no choices")]
    EmptyResponse,

    #[error("Prompt template not found: {0}")]
    TemplateNotFound(String),

    #[error("Prompt template '{template}' is missing a value for '{variable}'")]
    MissingTemplateVariable { template: String, variable: String },

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AskError {
    /// True when the remote service rejected the call for rate or quota reasons.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            AskError::Api(OpenAIError::Reqwest(reqwest_error)) => {
                reqwest_error.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS)
            }
            AskError::Api(OpenAIError::ApiError(api_error)) => is_rate_limit_api_error(api_error),
            _ => false,
        }
    }

    /// True when the remote service rejected the credential.
    pub fn is_auth(&self) -> bool {
        match self {
            AskError::Api(OpenAIError::Reqwest(reqwest_error)) => matches!(
                reqwest_error.status(),
                Some(reqwest::StatusCode::UNAUTHORIZED) | Some(reqwest::StatusCode::FORBIDDEN)
            ),
            AskError::Api(OpenAIError::ApiError(api_error)) => is_auth_api_error(api_error),
            _ => false,
        }
    }
}

fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
    let message = api_error.message.to_lowercase();
    let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
    let code = api_error.code.clone().unwrap_or_default().to_lowercase();

    message.contains("rate limit")
        || message.contains("too many requests")
        || error_type.contains("rate_limit")
        || error_type == "insufficient_quota"
        || code.contains("rate_limit")
        || code == "insufficient_quota"
}

fn is_auth_api_error(api_error: &ApiError) -> bool {
    let message = api_error.message.to_lowercase();
    let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
    let code = api_error.code.clone().unwrap_or_default().to_lowercase();

    message.contains("unauthorized")
        || message.contains("forbidden")
        || message.contains("authentication")
        || message.contains("invalid api key")
        || message.contains("incorrect api key")
        || code.contains("invalid_api_key")
        || code.contains("authentication")
        || error_type.contains("authentication")
}

pub type Result<T> = std::result::Result<T, AskError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(message: &str, error_type: Option<&str>, code: Option<&str>) -> AskError {
        AskError::Api(OpenAIError::ApiError(ApiError {
            message: message.to_string(),
            r#type: error_type.map(str::to_string),
            param: None,
            code: code.map(str::to_string),
        }))
    }

    #[test]
    fn test_insufficient_quota_is_rate_limit() {
        let error = api_error(
            "You exceeded your current quota",
            Some("insufficient_quota"),
            Some("insufficient_quota"),
        );
        assert!(error.is_rate_limit());
        assert!(!error.is_auth());
    }

    #[test]
    fn test_invalid_api_key_is_auth() {
        let error = api_error(
            "Incorrect API key provided",
            Some("invalid_request_error"),
            Some("invalid_api_key"),
        );
        assert!(error.is_auth());
        assert!(!error.is_rate_limit());
    }

    #[test]
    fn test_local_errors_are_not_classified() {
        assert!(!AskError::EmptyResponse.is_auth());
        assert!(!AskError::Validation("x".to_string()).is_rate_limit());
    }

    #[test]
    fn test_api_error_display_is_transparent() {
        let error = api_error("model overloaded", None, None);
        assert_eq!(error.to_string(), "model overloaded");
    }
}
