use std::sync::{Arc, PoisonError};

use shopbot_core::{AssistantReply, Intent, Recommender};
use tracing::{info, warn};

use crate::conversation::{SmallTalk, TRANSCRIPT_TURNS};
use crate::guardrails::{DegradeReason, ReplyPolicy};
use crate::history::{ChatRole, ChatTurn, SessionStore};
use crate::intent::IntentRouter;
use crate::llm::LlmClient;

/// Routes each message by intent and always returns a well-formed reply.
#[derive(Clone)]
pub struct AgentRuntime {
    router: IntentRouter,
    recommender: Recommender,
    small_talk: SmallTalk,
    policy: ReplyPolicy,
    sessions: Arc<dyn SessionStore>,
}

impl AgentRuntime {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        recommender: Recommender,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self::with_policy(llm, recommender, sessions, ReplyPolicy::default())
    }

    pub fn with_policy(
        llm: Arc<dyn LlmClient>,
        recommender: Recommender,
        sessions: Arc<dyn SessionStore>,
        policy: ReplyPolicy,
    ) -> Self {
        Self {
            router: IntentRouter::new(llm.clone()),
            small_talk: SmallTalk::new(llm, policy.clone()),
            recommender,
            policy,
            sessions,
        }
    }

    pub async fn handle_message(&self, session_id: &str, text: &str) -> AssistantReply {
        let query = text.trim();
        if query.is_empty() {
            let degradation = self.policy.degrade(DegradeReason::EmptyQuery);
            info!(
                event_name = "agent.message.rejected",
                session_id,
                reason_code = degradation.reason_code,
                "empty query short-circuited"
            );
            return AssistantReply::text(Intent::Unknown, degradation.user_message);
        }

        let intent = self.router.classify(query).await;
        info!(event_name = "agent.message.routed", session_id, intent = %intent, "message routed");

        let reply = match intent {
            Intent::Shopping => self.recommend(session_id, query).await,
            Intent::Greeting => AssistantReply::text(intent, self.policy.greeting.clone()),
            Intent::Chat => self.chat(session_id, query).await,
            Intent::Unknown => AssistantReply::text(
                intent,
                self.policy.degrade(DegradeReason::UnknownIntent).user_message,
            ),
        };

        self.record_turns(session_id, query, &reply.explanation);
        reply
    }

    async fn recommend(&self, session_id: &str, query: &str) -> AssistantReply {
        match self.recommender.recommend(query).await {
            Ok(result) => AssistantReply::from_recommendation(Intent::Shopping, &result),
            Err(error) => {
                let degradation = self.policy.degrade(DegradeReason::RecommendationFailed);
                warn!(
                    event_name = "agent.recommend.degraded",
                    session_id,
                    reason_code = degradation.reason_code,
                    oracle = %error.oracle(),
                    error = %error,
                    "recommendation pipeline failed"
                );
                AssistantReply::text(Intent::Shopping, degradation.user_message)
            }
        }
    }

    async fn chat(&self, session_id: &str, query: &str) -> AssistantReply {
        let transcript = self.recent_turns(session_id);
        match self.small_talk.reply(query, &transcript).await {
            Ok(reply) => AssistantReply::text(Intent::Chat, reply),
            Err(error) => {
                let degradation = self.policy.degrade(DegradeReason::ChatOracleFailed);
                warn!(
                    event_name = "agent.chat.degraded",
                    session_id,
                    reason_code = degradation.reason_code,
                    oracle = %error.oracle(),
                    error = %error,
                    "small talk reply failed"
                );
                AssistantReply::text(Intent::Chat, degradation.user_message)
            }
        }
    }

    fn recent_turns(&self, session_id: &str) -> Vec<ChatTurn> {
        let history = self.sessions.history(session_id);
        let history = history.lock().unwrap_or_else(PoisonError::into_inner);
        history.recent(TRANSCRIPT_TURNS)
    }

    fn record_turns(&self, session_id: &str, query: &str, reply: &str) {
        let history = self.sessions.history(session_id);
        let mut history = history.lock().unwrap_or_else(PoisonError::into_inner);
        history.push(ChatRole::User, query);
        if !reply.is_empty() {
            history.push(ChatRole::Assistant, reply);
        }
    }
}
