mod api;
mod completer;
pub mod prompts;

pub use api::LlmApiClient;
pub use completer::{rag_completion_prompt, Completer};
