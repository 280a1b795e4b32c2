//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port used by the fallback responder.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions (GPT-3.5, GPT-4)
//! - `OllamaProvider` - Local models served by Ollama

mod mock_provider;
mod ollama_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use ollama_provider::{OllamaConfig, OllamaProvider};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
