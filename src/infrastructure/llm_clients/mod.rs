pub mod openai;

use crate::domain::error::Result;
use crate::domain::api_config::LLMConfig;
use async_trait::async_trait;

pub use openai::OpenAIClient;

#[async_trait]
pub trait LLMClient {
    /// Sends `prompt` as a single user message and returns the answer text.
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String>;
}
