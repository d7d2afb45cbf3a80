//! Shopbot core - deterministic shopping recommendation pipeline
//!
//! Everything in this crate is free of network I/O except through the
//! [`retrieval::ProductRetriever`] trait. The LLM never influences filtering,
//! ranking or sizing; those are decided here from the query text alone.

pub mod config;
pub mod domain;
pub mod errors;
pub mod lexicon;
pub mod recommend;
pub mod retrieval;

pub use domain::intent::Intent;
pub use domain::product::{Candidate, RetrievedDocument};
pub use domain::recommendation::{AssistantReply, ProductView, RecommendationResult};
pub use errors::{ApplicationError, InterfaceError, Oracle, OracleError};
pub use lexicon::{CategoryRule, Lexicon};
pub use recommend::{ConstraintExtractor, ConstraintSet, Recommender, SortPreference};
pub use retrieval::{documents_from_json, ProductRetriever, StaticRetriever};
