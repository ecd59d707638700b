//! Text generation providers.
//!
//! - [`TextGenerator`] - The provider contract used by the prompt service
//! - [`OpenAiClient`] - OpenAI-compatible chat completions over HTTP
//! - [`UnconfiguredGenerator`] - Stand-in when no API key is configured

mod generator;
mod openai;
mod unconfigured;

pub use generator::{GenerationParams, TextGenerator};
pub use openai::OpenAiClient;
pub use unconfigured::UnconfiguredGenerator;

#[cfg(test)]
pub use generator::MockTextGenerator;
