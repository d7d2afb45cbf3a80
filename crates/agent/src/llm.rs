use async_trait::async_trait;
use shopbot_core::errors::{Oracle, OracleError};

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub purpose: Oracle,
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn classification(prompt: impl Into<String>) -> Self {
        Self { purpose: Oracle::Classification, prompt: prompt.into(), temperature: 0.0 }
    }

    pub fn reply(prompt: impl Into<String>) -> Self {
        Self { purpose: Oracle::Reply, prompt: prompt.into(), temperature: 0.5 }
    }
}

/// A single-turn text completion. Failures are tagged with the request's purpose.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, OracleError>;
}
