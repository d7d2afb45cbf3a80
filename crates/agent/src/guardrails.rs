//! Fixed replies for every path that does not produce a recommendation.

pub const GREETING_REPLY: &str =
    "Hi there! I’m your Flipkart AI shopping assistant. How can I help you today?";
pub const HELP_REPLY: &str = "I’m your Flipkart AI shopping assistant — I can help you find products, compare prices, or suggest top deals";
pub const OFF_TOPIC_REPLY: &str = "I'm your Flipkart AI shopping assistant — I can help you find products, compare prices, or suggest top deals 😊";
pub const CHAT_FALLBACK_REPLY: &str =
    "I'm your Flipkart shopping assistant — I can help you find products, deals, or comparisons 😊";
pub const EMPTY_QUERY_REPLY: &str = "Please enter a query.";
pub const RECOMMENDATION_FAILURE_REPLY: &str =
    "Sorry, something went wrong while fetching product recommendations 😅";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegradeReason {
    EmptyQuery,
    UnknownIntent,
    ChatOracleFailed,
    RecommendationFailed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Degradation {
    pub reason_code: &'static str,
    pub user_message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyPolicy {
    pub greeting: String,
    pub help: String,
    pub off_topic: String,
    pub chat_fallback: String,
    pub empty_query: String,
    pub recommendation_failure: String,
}

impl Default for ReplyPolicy {
    fn default() -> Self {
        Self {
            greeting: GREETING_REPLY.to_string(),
            help: HELP_REPLY.to_string(),
            off_topic: OFF_TOPIC_REPLY.to_string(),
            chat_fallback: CHAT_FALLBACK_REPLY.to_string(),
            empty_query: EMPTY_QUERY_REPLY.to_string(),
            recommendation_failure: RECOMMENDATION_FAILURE_REPLY.to_string(),
        }
    }
}

impl ReplyPolicy {
    pub fn degrade(&self, reason: DegradeReason) -> Degradation {
        match reason {
            DegradeReason::EmptyQuery => {
                Degradation { reason_code: "empty_query", user_message: self.empty_query.clone() }
            }
            DegradeReason::UnknownIntent => {
                Degradation { reason_code: "unknown_intent", user_message: self.help.clone() }
            }
            DegradeReason::ChatOracleFailed => Degradation {
                reason_code: "chat_oracle_failed",
                user_message: self.chat_fallback.clone(),
            },
            DegradeReason::RecommendationFailed => Degradation {
                reason_code: "recommendation_failed",
                user_message: self.recommendation_failure.clone(),
            },
        }
    }

    /// Prompt for open-domain replies. Off-topic questions are redirected to shopping.
    pub fn small_talk_prompt(&self, query: &str, transcript: &str) -> String {
        let mut prompt = format!(
            "You are Flipkart's friendly AI shopping assistant.\n\n\
             If the question is NOT related to e-commerce or products,\n\
             do NOT answer it directly.\n\
             Instead, say politely:\n\
             \"{}\"\n\n\
             If it IS product-related (like phones, deals, or shopping questions),\n\
             reply politely but concisely.\n",
            self.off_topic
        );

        if !transcript.is_empty() {
            prompt.push_str("\nConversation so far:\n");
            prompt.push_str(transcript);
            prompt.push('\n');
        }

        prompt.push_str(&format!("\nUser query: {query}"));
        prompt
    }
}
