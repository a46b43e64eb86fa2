use crate::domain::api_config::EsgApiConfig;
use crate::domain::error::Result;
use crate::infrastructure::esg_clients::EsgScoreClient;
use serde_json::Value;
use std::sync::Arc;

pub struct EsgLookupUseCase {
    esg_client: Arc<dyn EsgScoreClient + Send + Sync>,
    config: EsgApiConfig,
}

impl EsgLookupUseCase {
    pub fn new(esg_client: Arc<dyn EsgScoreClient + Send + Sync>, config: EsgApiConfig) -> Self {
        Self { esg_client, config }
    }

    /// Returns the first score object for `company_name`, or `Value::Null`
    /// when the service knows no match.
    pub async fn execute(&self, company_name: &str) -> Result<Value> {
        let scores = self.esg_client.scores(&self.config, company_name).await?;
        Ok(scores.into_iter().next().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedScores(Vec<Value>);

    #[async_trait]
    impl EsgScoreClient for FixedScores {
        async fn scores(&self, _config: &EsgApiConfig, _company_name: &str) -> Result<Vec<Value>> {
            Ok(self.0.clone())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl EsgScoreClient for Unreachable {
        async fn scores(&self, _config: &EsgApiConfig, _company_name: &str) -> Result<Vec<Value>> {
            Err(AppError::UpstreamError("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_returns_first_result() {
        let use_case = EsgLookupUseCase::new(
            Arc::new(FixedScores(vec![
                json!({ "companyname": "Acme", "Overall Score": 80 }),
                json!({ "companyname": "Acme Holdings", "Overall Score": 10 }),
            ])),
            EsgApiConfig::default(),
        );

        let result = use_case.execute("Acme").await.unwrap();
        assert_eq!(result["companyname"], "Acme");
    }

    #[tokio::test]
    async fn test_empty_result_is_null() {
        let use_case =
            EsgLookupUseCase::new(Arc::new(FixedScores(Vec::new())), EsgApiConfig::default());

        assert_eq!(use_case.execute("Nobody").await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_propagates_upstream_error() {
        let use_case = EsgLookupUseCase::new(Arc::new(Unreachable), EsgApiConfig::default());

        let result = use_case.execute("Acme").await;
        assert!(matches!(result, Err(AppError::UpstreamError(_))));
    }
}
