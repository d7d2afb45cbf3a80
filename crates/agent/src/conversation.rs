use std::sync::Arc;

use shopbot_core::errors::{Oracle, OracleError};

use crate::guardrails::ReplyPolicy;
use crate::history::{ChatRole, ChatTurn};
use crate::llm::{CompletionRequest, LlmClient};

/// Number of prior turns included in an open-domain prompt.
pub const TRANSCRIPT_TURNS: usize = 6;

/// Open-domain replies for the `chat` intent, kept on-topic by the reply policy prompt.
#[derive(Clone)]
pub struct SmallTalk {
    llm: Arc<dyn LlmClient>,
    policy: ReplyPolicy,
}

impl SmallTalk {
    pub fn new(llm: Arc<dyn LlmClient>, policy: ReplyPolicy) -> Self {
        Self { llm, policy }
    }

    pub async fn reply(&self, query: &str, history: &[ChatTurn]) -> Result<String, OracleError> {
        let prompt = self.policy.small_talk_prompt(query, &render_transcript(history));
        let reply = self.llm.complete(CompletionRequest::reply(prompt)).await?;
        let reply = reply.trim();

        if reply.is_empty() {
            return Err(OracleError::InvalidResponse {
                oracle: Oracle::Reply,
                message: "empty completion".to_string(),
            });
        }

        Ok(reply.to_string())
    }
}

pub fn render_transcript(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            format!("{speaker}: {}", turn.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
