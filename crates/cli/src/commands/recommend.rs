use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use shopbot_core::config::{AppConfig, LoadOptions};
use shopbot_core::{
    documents_from_json, AssistantReply, Intent, Recommender, RetrievedDocument, StaticRetriever,
};

use super::CommandResult;

/// Runs the recommendation pipeline over a local JSON catalog instead of the retrieval
/// service. The query is always treated as a shopping query.
pub fn run(catalog: &Path, query: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    let query = query.trim();
    if query.is_empty() {
        return CommandResult::failure(
            "recommend",
            "invalid_request",
            "query must not be empty",
            4,
        );
    }

    let documents = match load_catalog(catalog) {
        Ok(documents) => documents,
        Err(error) => {
            return CommandResult::failure("recommend", "catalog", format!("{error:#}"), 3);
        }
    };
    let document_count = documents.len();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                1,
            );
        }
    };

    let recommender = Recommender::new(
        config.catalog.lexicon(),
        Arc::new(StaticRetriever::new(documents).with_top_k(config.retrieval.top_k)),
    );
    match runtime.block_on(recommender.recommend(query)) {
        Ok(result) => {
            let reply = AssistantReply::from_recommendation(Intent::Shopping, &result);
            CommandResult::success_with_data(
                "recommend",
                format!(
                    "{} of {document_count} catalog products selected",
                    reply.products.len()
                ),
                &reply,
            )
        }
        Err(error) => CommandResult::failure("recommend", "retrieval", error.to_string(), 5),
    }
}

fn load_catalog(path: &Path) -> Result<Vec<RetrievedDocument>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog `{}`", path.display()))?;
    documents_from_json(&raw)
        .with_context(|| format!("catalog `{}` is not a JSON list of documents", path.display()))
}
