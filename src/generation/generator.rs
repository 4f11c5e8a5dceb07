//! Answer generation for all modes.

use tracing::{debug, warn};

use crate::model::{Answer, Mode, RetrievedContext};

use super::prompt::build_prompt;
use super::provider::GenerationProvider;
use super::script::TargetLanguage;

/// Builds the prompt, calls the provider and post-processes the reply.
pub struct AnswerGenerator<G> {
    provider: Option<G>,
    language: TargetLanguage,
}

impl<G: GenerationProvider> AnswerGenerator<G> {
    /// Create a generator. `provider` is `None` when nothing is configured.
    pub fn new(provider: Option<G>, language: TargetLanguage) -> Self {
        Self { provider, language }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<&G> {
        self.provider.as_ref()
    }

    pub fn language(&self) -> &TargetLanguage {
        &self.language
    }

    /// Produce an answer. Never fails.
    ///
    /// Without a provider the mock answer is returned and nothing is sent.
    /// Provider errors become [`Answer::Failed`].
    pub async fn generate(
        &self,
        query: &str,
        mode: Mode,
        context: Option<&RetrievedContext>,
    ) -> Answer {
        let Some(provider) = &self.provider else {
            warn!("Generation provider not configured, returning mock answer");
            return Answer::mock();
        };

        let prompt = build_prompt(mode, query, context, &self.language);
        debug!(%mode, prompt_len = prompt.len(), "Generating answer");

        match provider.generate(&prompt).await {
            Ok(text) if mode == Mode::Translate => {
                Answer::Generated(self.language.filter().apply(&text))
            }
            Ok(text) => Answer::Generated(text),
            Err(e) => {
                let info = provider.info();
                warn!(provider = %info.name, %mode, "Generation failed: {e}");
                Answer::Failed {
                    provider: info.label,
                    label: mode.failure_label().to_string(),
                    message: e.to_string(),
                }
            }
        }
    }
}
