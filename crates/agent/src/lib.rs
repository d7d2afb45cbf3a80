//! Conversational layer of the shopping assistant.
//!
//! Every message goes through the same loop:
//! 1. **Intent routing** (`intent`) - the classification oracle labels the query
//! 2. **Dispatch** (`runtime`) - shopping queries run the recommendation pipeline,
//!    greetings and unknown queries get fixed replies, chat goes to the reply oracle
//! 3. **Degradation** (`guardrails`) - any oracle failure becomes a polite fixed reply
//!
//! The LLM only labels and chats. Filtering, ranking and sizing of products are
//! deterministic and live in `shopbot-core`.

pub mod conversation;
pub mod guardrails;
pub mod history;
pub mod intent;
pub mod llm;
pub mod runtime;

pub use history::{InMemorySessionStore, SessionStore};
pub use llm::{CompletionRequest, LlmClient};
pub use runtime::AgentRuntime;
