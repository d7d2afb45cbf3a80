use std::sync::Arc;

use shopbot_core::Intent;
use tracing::{debug, warn};

use crate::llm::{CompletionRequest, LlmClient};

pub fn classification_prompt(query: &str) -> String {
    format!(
        "Classify user intent into one of these categories:\n\
         1. shopping - asking about products, prices, deals, ratings, comparisons, etc.\n\
         2. greeting - greeting messages like hi, hello, hey.\n\
         3. chat - non-shopping talk or general questions.\n\
         4. unknown - anything unclear.\n\
         \n\
         User: \"{query}\"\n\
         Answer with only one word: shopping / greeting / chat / unknown"
    )
}

/// Labels queries through the classification oracle. Never fails: an oracle error
/// degrades to [`Intent::Unknown`] for that request only.
#[derive(Clone)]
pub struct IntentRouter {
    llm: Arc<dyn LlmClient>,
}

impl IntentRouter {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn classify(&self, query: &str) -> Intent {
        match self.llm.complete(CompletionRequest::classification(classification_prompt(query))).await
        {
            Ok(label) => {
                let intent = Intent::from_label(&label);
                debug!(
                    event_name = "agent.intent.classified",
                    raw_label = %label.trim(),
                    intent = %intent,
                    "intent classified"
                );
                intent
            }
            Err(error) => {
                warn!(
                    event_name = "agent.intent.degraded",
                    error = %error,
                    "intent classification failed, treating query as unknown"
                );
                Intent::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use shopbot_core::errors::{Oracle, OracleError};
    use shopbot_core::Intent;

    use super::{classification_prompt, IntentRouter};
    use crate::llm::{CompletionRequest, LlmClient};

    struct ScriptedLlm {
        answer: Result<String, OracleError>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, request: CompletionRequest) -> Result<String, OracleError> {
            self.requests.lock().expect("request log lock").push(request);
            self.answer.clone()
        }
    }

    fn scripted(answer: Result<String, OracleError>) -> Arc<ScriptedLlm> {
        Arc::new(ScriptedLlm { answer, requests: Mutex::new(Vec::new()) })
    }

    #[tokio::test]
    async fn classifies_from_oracle_label() {
        let llm = scripted(Ok(" Shopping\n".to_string()));
        let router = IntentRouter::new(llm.clone());

        assert_eq!(router.classify("best phones under 20000").await, Intent::Shopping);

        let requests = llm.requests.lock().expect("request log lock");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].purpose, Oracle::Classification);
        assert!(requests[0].prompt.contains("best phones under 20000"));
    }

    #[tokio::test]
    async fn oracle_failure_degrades_to_unknown() {
        let router = IntentRouter::new(scripted(Err(OracleError::Timeout {
            oracle: Oracle::Classification,
        })));

        assert_eq!(router.classify("hello").await, Intent::Unknown);
    }

    #[tokio::test]
    async fn unexpected_label_is_unknown() {
        let router = IntentRouter::new(scripted(Ok("I think this is shopping".to_string())));
        assert_eq!(router.classify("phones").await, Intent::Unknown);
    }

    #[test]
    fn prompt_lists_every_label() {
        let prompt = classification_prompt("hi");
        for label in ["shopping", "greeting", "chat", "unknown"] {
            assert!(prompt.contains(label), "prompt should mention {label}");
        }
    }
}
