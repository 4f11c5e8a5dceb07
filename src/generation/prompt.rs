//! Prompt templates, one per mode.

use crate::model::{Mode, RetrievedContext};

use super::script::TargetLanguage;

/// Render the prompt for `mode`.
///
/// `context` is only used in chat mode; a missing context leaves the slot
/// empty.
#[must_use]
pub fn build_prompt(
    mode: Mode,
    query: &str,
    context: Option<&RetrievedContext>,
    language: &TargetLanguage,
) -> String {
    match mode {
        Mode::Chat => {
            let context = context.map(RetrievedContext::as_prompt_text).unwrap_or_default();
            format!("Context: {context}\n\nQuestion: {query}")
        }
        Mode::Translate => format!(
            "Translate this to {}: {query}. Provide only the translation, nothing else.",
            language.name()
        ),
        Mode::Explain => format!("Explain the following concept: {query}"),
    }
}
