use crate::domain::api_config::LLMConfig;
use crate::domain::error::Result;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;

/// Single-turn natural-language question answered by the completion model.
pub struct QueryUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
}

impl QueryUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Self {
        Self { llm_client, config }
    }

    pub async fn execute(&self, query: &str) -> Result<String> {
        self.llm_client.generate(&self.config, query).await
    }
}
