//! Prompt templates with named `{slot}` placeholders
//!
//! The registry is static and each template text exists exactly once.
//! [`render_template`] fills a template by name; the typed builders fill a
//! known template with every slot supplied.

use crate::error::{AskError, Result};

const GENERAL_QUERY: &str = concat!(
    "\n",
    "    Answer the following question accurately and concisely:\n",
    "    {question}\n",
    "    ",
);

const RAG_QUERY: &str = concat!(
    "\n",
    "    Using the following context, answer the question:\n",
    "    \n",
    "    Context:\n",
    "    {context}\n",
    "    \n",
    "    Question:\n",
    "    {question}\n",
    "    ",
);

/// Every known template, keyed by name.
pub const PROMPT_TEMPLATES: &[(&str, &str)] =
    &[("general_query", GENERAL_QUERY), ("rag_query", RAG_QUERY)];

/// Look up the raw template stored under `name`.
///
/// # Example
/// ```
/// use askrag::llm::prompts::get_template;
///
/// assert!(get_template("general_query").unwrap().contains("{question}"));
/// assert!(get_template("nope").is_err());
/// ```
pub fn get_template(name: &str) -> Result<&'static str> {
    PROMPT_TEMPLATES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, template)| *template)
        .ok_or_else(|| AskError::TemplateNotFound(name.to_string()))
}

pub fn template_names() -> impl Iterator<Item = &'static str> {
    PROMPT_TEMPLATES.iter().map(|(name, _)| *name)
}

/// Generate a prompt asking for a short, accurate answer to `question`
pub fn general_query_prompt(question: &str) -> String {
    fill(GENERAL_QUERY, &[("question", question)]).0
}

/// Generate a prompt asking to answer `question` from the supplied `context`
///
/// # Example
/// ```
/// use askrag::llm::prompts::rag_query_prompt;
///
/// let prompt = rag_query_prompt("Remote work is allowed on Fridays.", "When can I work remotely?");
/// assert!(prompt.contains("Context:\n    Remote work is allowed on Fridays."));
/// ```
pub fn rag_query_prompt(context: &str, question: &str) -> String {
    fill(RAG_QUERY, &[("context", context), ("question", question)]).0
}

/// Substitute `{slot}` placeholders of the named template.
///
/// Values are inserted verbatim and never re-scanned. Braces that do not
/// enclose a plain identifier are copied through unchanged. Unused values
/// are ignored.
pub fn render_template(name: &str, values: &[(&str, &str)]) -> Result<String> {
    let template = get_template(name)?;

    match fill(template, values) {
        (rendered, None) => Ok(rendered),
        (_, Some(variable)) => Err(AskError::MissingTemplateVariable {
            template: name.to_string(),
            variable,
        }),
    }
}

/// Single-pass substitution. Slots without a value are kept as written and
/// the first one is reported alongside the output.
fn fill(template: &str, values: &[(&str, &str)]) -> (String, Option<String>) {
    let mut rendered = String::with_capacity(template.len());
    let mut missing = None;
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let slot = after_open
            .find('}')
            .map(|close| (&after_open[..close], close))
            .filter(|(slot, _)| is_slot_name(slot));

        match slot {
            Some((slot, close)) => {
                match values.iter().find(|(key, _)| *key == slot) {
                    Some((_, value)) => rendered.push_str(value),
                    None => {
                        rendered.push_str(&rest[open..open + close + 2]);
                        missing.get_or_insert_with(|| slot.to_string());
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = after_open;
            }
        }
    }

    rendered.push_str(rest);
    (rendered, missing)
}

fn is_slot_name(slot: &str) -> bool {
    !slot.is_empty() && slot.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
