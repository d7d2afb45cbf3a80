use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shopbot_agent::llm::{CompletionRequest, LlmClient};
use shopbot_core::config::LlmConfig;
use shopbot_core::errors::{Oracle, OracleError};

/// OpenAI-compatible `/chat/completions` client. Groq, OpenAI and Ollama all speak it.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.resolved_base_url(),
            &config.model,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, OracleError> {
        let oracle = request.purpose;
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage { role: "user", content: &request.prompt }],
            temperature: request.temperature,
        };

        let mut builder = self.http.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key.expose_secret());
        }

        let response = builder.send().await.map_err(|error| transport_error(oracle, error))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(OracleError::Unavailable {
                oracle,
                message: format!("chat completion returned {status}: {}", snippet(&detail)),
            });
        }

        let payload = response.text().await.map_err(|error| transport_error(oracle, error))?;
        parse_completion(oracle, &payload)
    }
}

pub(crate) fn transport_error(oracle: Oracle, error: reqwest::Error) -> OracleError {
    if error.is_timeout() {
        OracleError::Timeout { oracle }
    } else {
        OracleError::Unavailable { oracle, message: error.to_string() }
    }
}

pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

fn parse_completion(oracle: Oracle, payload: &str) -> Result<String, OracleError> {
    let response: ChatResponse = serde_json::from_str(payload).map_err(|error| {
        OracleError::InvalidResponse { oracle, message: format!("malformed completion: {error}") }
    })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| OracleError::InvalidResponse {
            oracle,
            message: "completion carried no message content".to_string(),
        })
}
