use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::product::RetrievedDocument;
use crate::errors::OracleError;

/// Semantic search over the product collection. Results are relevance-ordered, best effort.
#[async_trait]
pub trait ProductRetriever: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<RetrievedDocument>, OracleError>;
}

/// Serves a fixed catalog in its stored order, ignoring the query text.
#[derive(Clone, Debug, Default)]
pub struct StaticRetriever {
    documents: Vec<RetrievedDocument>,
    top_k: Option<usize>,
}

impl StaticRetriever {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self { documents, top_k: None }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// Either a bare JSON array of documents or an object wrapping them under `documents`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentSet {
    Bare(Vec<RetrievedDocument>),
    Wrapped { documents: Vec<RetrievedDocument> },
}

pub fn documents_from_json(payload: &str) -> Result<Vec<RetrievedDocument>, serde_json::Error> {
    match serde_json::from_str::<DocumentSet>(payload)? {
        DocumentSet::Bare(documents) | DocumentSet::Wrapped { documents } => Ok(documents),
    }
}

#[async_trait]
impl ProductRetriever for StaticRetriever {
    async fn search(&self, _query: &str) -> Result<Vec<RetrievedDocument>, OracleError> {
        let limit = self.top_k.unwrap_or(self.documents.len());
        Ok(self.documents.iter().take(limit).cloned().collect())
    }
}
