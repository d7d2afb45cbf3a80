use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    routing::post,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use shopbot_agent::AgentRuntime;
use shopbot_core::errors::{ApplicationError, InterfaceError};
use shopbot_core::AssistantReply;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct RecommendState {
    runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub correlation_id: String,
}

pub fn router(runtime: Arc<AgentRuntime>) -> Router {
    Router::new().route("/recommend", post(recommend)).with_state(RecommendState { runtime })
}

async fn recommend(
    State(state): State<RecommendState>,
    form: Result<Form<RecommendForm>, FormRejection>,
) -> Result<Json<AssistantReply>, (StatusCode, Json<ErrorBody>)> {
    let correlation_id = Uuid::new_v4().to_string();
    let Form(form) = form.map_err(|rejection| {
        warn!(
            event_name = "http.recommend.rejected",
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "recommend form could not be parsed"
        );
        error_response(
            ApplicationError::InvalidRequest(rejection.body_text()).into_interface(&correlation_id),
        )
    })?;

    // Without a client session id the request gets a history of its own.
    let session_id = form
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| format!("anonymous-{correlation_id}"), str::to_string);

    let reply = state.runtime.handle_message(&session_id, &form.msg).await;
    info!(
        event_name = "http.recommend.completed",
        correlation_id = %correlation_id,
        session_id = %session_id,
        intent = %reply.intent,
        products = reply.products.len(),
        "recommend request served"
    );

    Ok(Json(reply))
}

fn error_response(error: InterfaceError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
    };
    let body = ErrorBody {
        error: error.user_message().to_string(),
        correlation_id: error.correlation_id().to_string(),
    };
    (status, Json(body))
}
