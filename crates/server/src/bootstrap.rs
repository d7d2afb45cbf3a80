use std::sync::Arc;

use axum::Router;
use shopbot_agent::{AgentRuntime, InMemorySessionStore};
use shopbot_core::config::{AppConfig, ConfigError, LoadOptions};
use shopbot_core::Recommender;
use thiserror::Error;
use tracing::info;

use crate::health::{self, HealthState};
use crate::llm::ChatCompletionsClient;
use crate::recommend;
use crate::retrieval::HttpProductRetriever;

pub struct Application {
    pub config: AppConfig,
    pub runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl Application {
    pub fn router(&self) -> Router {
        recommend::router(self.runtime.clone())
            .merge(health::router(HealthState::from_config(&self.config)))
    }
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let llm = ChatCompletionsClient::from_config(&config.llm).map_err(BootstrapError::HttpClient)?;
    let retriever =
        HttpProductRetriever::from_config(&config.retrieval).map_err(BootstrapError::HttpClient)?;
    info!(
        event_name = "system.bootstrap.oracles_configured",
        correlation_id = "bootstrap",
        llm_endpoint = %llm.endpoint(),
        retrieval_endpoint = %config.retrieval.endpoint,
        "oracle clients configured"
    );

    let recommender = Recommender::new(config.catalog.lexicon(), Arc::new(retriever));
    let runtime =
        AgentRuntime::new(Arc::new(llm), recommender, Arc::new(InMemorySessionStore::default()));

    Ok(Application { config, runtime: Arc::new(runtime) })
}
