use serde_json::json;
use wiremock::MockServer;

use askrag::config::LlmConfig;
use askrag::LlmApiClient;

pub fn llm_config_with_base_url(base_url: String) -> LlmConfig {
    LlmConfig {
        model: "gpt-3.5-turbo".to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url),
        timeout_secs: Some(5),
    }
}

pub fn mock_client(server: &MockServer) -> LlmApiClient {
    let config = llm_config_with_base_url(format!("{}/v1", server.uri()));
    LlmApiClient::new(&config).unwrap_or_else(|e| panic!("Failed to build client: {e}"))
}

pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-3.5-turbo",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str, error_type: &str, code: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": serde_json::Value::Null,
            "code": code
        }
    })
}
