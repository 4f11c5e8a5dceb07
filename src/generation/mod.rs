//! Answer generation.
//!
//! - [`provider`] - the provider trait and its boxed form
//! - [`cohere`], [`ollama`] - HTTP backends
//! - [`prompt`] - per-mode prompt templates
//! - [`script`] - target-script filter for translations
//! - [`generator`] - ties them together with mock and failure fallbacks

pub mod cohere;
pub mod factory;
pub mod generator;
pub mod ollama;
pub mod prompt;
pub mod provider;
pub mod script;

pub use cohere::CohereChat;
pub use factory::create_generation_provider;
pub use generator::AnswerGenerator;
pub use ollama::OllamaGenerator;
pub use prompt::build_prompt;
pub use provider::{BoxedGenerator, GenerationProvider, GeneratorInfo};
pub use script::{ScriptFilter, TargetLanguage};
