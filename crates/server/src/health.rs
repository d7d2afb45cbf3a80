use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use shopbot_core::config::{AppConfig, LlmConfig, RetrievalConfig};

#[derive(Clone)]
pub struct HealthState {
    llm: HealthCheck,
    retrieval: HealthCheck,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub llm: HealthCheck,
    pub retrieval: HealthCheck,
    pub checked_at: String,
}

impl HealthState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self { llm: llm_check(&config.llm), retrieval: retrieval_check(&config.retrieval) }
    }
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let ready = state.llm.status == "ready" && state.retrieval.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "shopbot-server runtime initialized".to_string(),
        },
        llm: state.llm,
        retrieval: state.retrieval,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn llm_check(config: &LlmConfig) -> HealthCheck {
    if config.provider.requires_api_key() && config.api_key.is_none() {
        return HealthCheck {
            status: "degraded",
            detail: format!("{:?} provider configured without an api key", config.provider),
        };
    }

    HealthCheck {
        status: "ready",
        detail: format!("model `{}` via {}", config.model, config.resolved_base_url()),
    }
}

fn retrieval_check(config: &RetrievalConfig) -> HealthCheck {
    if config.endpoint.trim().is_empty() {
        return HealthCheck {
            status: "degraded",
            detail: "retrieval endpoint is not configured".to_string(),
        };
    }

    HealthCheck {
        status: "ready",
        detail: format!("top_k={} via {}", config.top_k, config.endpoint),
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, Json};
    use shopbot_core::config::{AppConfig, LlmProvider};

    use crate::health::{health, HealthState};

    #[tokio::test]
    async fn health_is_ready_for_default_configuration() {
        let (status, Json(payload)) = health(State(HealthState::from_config(&AppConfig::default()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.llm.status, "ready");
        assert_eq!(payload.retrieval.status, "ready");
        assert!(payload.llm.detail.contains("llama3.1"));
        assert!(!payload.checked_at.is_empty());
    }

    #[tokio::test]
    async fn hosted_provider_without_key_is_degraded() {
        let mut config = AppConfig::default();
        config.llm.provider = LlmProvider::Groq;
        config.llm.api_key = None;

        let (status, Json(payload)) = health(State(HealthState::from_config(&config))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.llm.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
