use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use shopbot_core::config::RetrievalConfig;
use shopbot_core::errors::{Oracle, OracleError};
use shopbot_core::{documents_from_json, ProductRetriever, RetrievedDocument};
use tracing::debug;

use crate::llm::{snippet, transport_error};

/// Similarity search over a JSON vector-search endpoint.
#[derive(Clone)]
pub struct HttpProductRetriever {
    http: reqwest::Client,
    endpoint: String,
    top_k: usize,
    api_token: Option<SecretString>,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    k: usize,
}

impl HttpProductRetriever {
    pub fn from_config(config: &RetrievalConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.endpoint,
            config.top_k,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn new(
        endpoint: &str,
        top_k: usize,
        api_token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint: endpoint.trim().to_string(), top_k, api_token })
    }
}

#[async_trait]
impl ProductRetriever for HttpProductRetriever {
    async fn search(&self, query: &str) -> Result<Vec<RetrievedDocument>, OracleError> {
        let oracle = Oracle::Retrieval;
        let mut builder =
            self.http.post(&self.endpoint).json(&SearchRequest { query, k: self.top_k });
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let response = builder.send().await.map_err(|error| transport_error(oracle, error))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(OracleError::Unavailable {
                oracle,
                message: format!("search returned {status}: {}", snippet(&detail)),
            });
        }

        let payload = response.text().await.map_err(|error| transport_error(oracle, error))?;
        let documents = parse_documents(&payload)?;
        debug!(
            event_name = "retrieval.search.completed",
            documents = documents.len(),
            top_k = self.top_k,
            "similarity search completed"
        );
        Ok(documents)
    }
}

fn parse_documents(payload: &str) -> Result<Vec<RetrievedDocument>, OracleError> {
    documents_from_json(payload).map_err(|error| OracleError::InvalidResponse {
        oracle: Oracle::Retrieval,
        message: format!("malformed search response: {error}"),
    })
}
