pub mod config;
pub mod error;
pub mod evaluation;
pub mod llm;

pub use error::{AskError, Result};
pub use llm::{Completer, LlmApiClient};
