use serde::{Deserialize, Serialize};

use crate::domain::intent::Intent;
use crate::domain::product::Candidate;

pub const SUMMARY_PREVIEW_CHARS: usize = 150;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub explanation: String,
    pub products: Vec<Candidate>,
}

impl RecommendationResult {
    pub fn explained(explanation: impl Into<String>) -> Self {
        Self { explanation: explanation.into(), products: Vec::new() }
    }
}

/// Wire shape of a single product in an assistant reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub title: String,
    pub rating: f64,
    pub price: f64,
    pub summary: String,
    pub image_url: String,
}

impl From<&Candidate> for ProductView {
    fn from(candidate: &Candidate) -> Self {
        Self {
            title: candidate.title.clone(),
            rating: candidate.rating,
            price: candidate.price,
            summary: candidate.summary.chars().take(SUMMARY_PREVIEW_CHARS).collect(),
            image_url: candidate.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Response returned for every query, whatever the intent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub intent: Intent,
    pub explanation: String,
    pub products: Vec<ProductView>,
}

impl AssistantReply {
    pub fn text(intent: Intent, explanation: impl Into<String>) -> Self {
        Self { intent, explanation: explanation.into(), products: Vec::new() }
    }

    pub fn from_recommendation(intent: Intent, result: &RecommendationResult) -> Self {
        Self {
            intent,
            explanation: result.explanation.clone(),
            products: result.products.iter().map(ProductView::from).collect(),
        }
    }
}
