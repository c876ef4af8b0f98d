use async_trait::async_trait;

use crate::error::Result;

/// Builds the prompt sent by [`Completer::get_rag_completion`].
///
/// The context is opaque caller-supplied text; nothing is retrieved or ranked.
///
/// # Example
/// ```
/// use askrag::llm::rag_completion_prompt;
///
/// let prompt = rag_completion_prompt("What time is it?", "It is 5pm.");
/// assert_eq!(prompt, "Context: It is 5pm.\n\nQuery: What time is it?");
/// ```
pub fn rag_completion_prompt(query: &str, context: &str) -> String {
    format!("Context: {context}\n\nQuery: {query}")
}

/// Anything that can turn a prompt into a single text completion.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Submit `prompt` as one user message and return the model's reply text.
    async fn get_completion(&self, prompt: &str) -> Result<String>;

    /// Prefix `query` with `context` and complete the combined prompt.
    async fn get_rag_completion(&self, query: &str, context: &str) -> Result<String> {
        let prompt = rag_completion_prompt(query, context);
        self.get_completion(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCompleter {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Completer for RecordingCompleter {
        async fn get_completion(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("echo: {prompt}"))
        }
    }

    #[tokio::test]
    async fn test_rag_completion_forwards_formatted_prompt() {
        let completer = RecordingCompleter::default();

        let reply = completer
            .get_rag_completion("What time is it?", "It is 5pm.")
            .await
            .unwrap();

        let prompts = completer.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], "Context: It is 5pm.\n\nQuery: What time is it?");
        assert_eq!(reply, "echo: Context: It is 5pm.\n\nQuery: What time is it?");
    }

    #[test]
    fn test_rag_prompt_keeps_context_verbatim() {
        let context = "line one\nline two {not a slot}";
        let prompt = rag_completion_prompt("q", context);
        assert_eq!(prompt, "Context: line one\nline two {not a slot}\n\nQuery: q");
    }

    #[test]
    fn test_rag_prompt_with_empty_context() {
        assert_eq!(rag_completion_prompt("q", ""), "Context: \n\nQuery: q");
    }
}
