//! The question-answering agent.
//!
//! Validates the mode, retrieves context for chat queries, and hands the
//! query to the answer generator. Providers are injected at construction;
//! [`Agent::from_config`] wires the configured backends.

use tracing::{debug, info_span, Instrument};

use crate::config::ResolvedConfig;
use crate::embeddings::{create_embedding_provider, BoxedProvider, EmbeddingProvider, QueryEmbedder};
use crate::error::Result;
use crate::generation::{
    create_generation_provider, AnswerGenerator, BoxedGenerator, GenerationProvider,
    TargetLanguage,
};
use crate::model::{Answer, Mode};
use crate::retrieval::{create_index, ContentRetriever, IndexBackend, RetrievalIndex};

/// Agent wired from configuration.
pub type ConfiguredAgent = Agent<BoxedProvider, IndexBackend, BoxedGenerator>;

/// Retrieval-augmented question answering.
pub struct Agent<E, I, G> {
    retriever: ContentRetriever<E, I>,
    generator: AnswerGenerator<G>,
    default_collection: String,
    default_limit: usize,
}

impl ConfiguredAgent {
    /// Build the agent from resolved configuration.
    ///
    /// Missing providers are not an error; the pipeline falls back at call
    /// time.
    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let provider = create_embedding_provider(config);
        let dimensions = config.embedding_dim_for(provider.as_ref().map(|p| p.info().dimensions));
        let embedder = QueryEmbedder::new(provider, dimensions);
        Agent::new(
            ContentRetriever::new(embedder, create_index(config)),
            AnswerGenerator::new(
                create_generation_provider(config),
                TargetLanguage::from_name(&config.target_language),
            ),
        )
        .with_defaults(&config.collection, config.retrieval_limit)
    }
}

impl<E, I, G> Agent<E, I, G>
where
    E: EmbeddingProvider,
    I: RetrievalIndex,
    G: GenerationProvider,
{
    pub fn new(retriever: ContentRetriever<E, I>, generator: AnswerGenerator<G>) -> Self {
        Self {
            retriever,
            generator,
            default_collection: crate::config::DEFAULT_COLLECTION.to_string(),
            default_limit: crate::config::DEFAULT_RETRIEVAL_LIMIT,
        }
    }

    /// Override the collection and limit used when a call omits them.
    #[must_use]
    pub fn with_defaults(mut self, collection: &str, limit: usize) -> Self {
        self.default_collection = collection.to_string();
        self.default_limit = limit;
        self
    }

    pub fn retriever(&self) -> &ContentRetriever<E, I> {
        &self.retriever
    }

    pub fn generator(&self) -> &AnswerGenerator<G> {
        &self.generator
    }

    /// Answer `query` in the mode named by `mode`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMode` for anything other than `chat`, `translate` or
    /// `explain`. No provider is called in that case.
    pub async fn ask(
        &self,
        query: &str,
        mode: &str,
        collection: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Answer> {
        let mode: Mode = mode.parse()?;
        self.ask_with_mode(query, mode, collection, limit).await
    }

    /// Typed variant of [`Agent::ask`].
    ///
    /// Never fails: a bad `limit` surfaces as a retrieval failure inside the
    /// chat context, and the other modes ignore it.
    ///
    /// # Errors
    ///
    /// None at present; the `Result` mirrors [`Agent::ask`].
    pub async fn ask_with_mode(
        &self,
        query: &str,
        mode: Mode,
        collection: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Answer> {
        let collection = collection.unwrap_or(&self.default_collection);
        let limit = limit.unwrap_or(self.default_limit);

        let span = info_span!("ask", %mode, collection);
        let answer = async {
            let context = if mode.uses_retrieval() {
                Some(self.retriever.retrieve(query, collection, limit).await)
            } else {
                None
            };

            let answer = self.generator.generate(query, mode, context.as_ref()).await;
            debug!(status = answer.status(), "Answer ready");
            answer
        }
        .instrument(span)
        .await;

        Ok(answer)
    }
}
