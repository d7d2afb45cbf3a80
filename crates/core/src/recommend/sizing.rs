use crate::domain::product::Candidate;
use crate::domain::recommendation::RecommendationResult;
use crate::recommend::constraints::ConstraintSet;

pub const NO_MATCHES_EXPLANATION: &str = "I couldn’t find any products matching your filters 😅";

/// Cuts the ranked survivors down to the requested count, or explains the shortfall.
pub fn size_results(ranked: Vec<Candidate>, constraints: &ConstraintSet) -> RecommendationResult {
    if ranked.is_empty() {
        return RecommendationResult::explained(NO_MATCHES_EXPLANATION);
    }

    if ranked.len() < constraints.requested_count {
        return RecommendationResult {
            explanation: shortfall_explanation(ranked.len(), constraints),
            products: ranked,
        };
    }

    let mut products = ranked;
    products.truncate(constraints.requested_count);
    RecommendationResult { explanation: String::new(), products }
}

pub fn shortfall_explanation(found: usize, constraints: &ConstraintSet) -> String {
    let mut explanation = format!(
        "I could only find {found} matching {}",
        constraints.category.as_deref().unwrap_or("products")
    );

    if let Some(brand) = constraints.brand.as_deref() {
        explanation.push_str(&format!(" from {brand}"));
    }
    if let Some(max_price) = constraints.max_price {
        explanation.push_str(&format!(" under ₹{}", whole_rupees(max_price)));
    }
    if let Some(min_price) = constraints.min_price {
        explanation.push_str(&format!(" above ₹{}", whole_rupees(min_price)));
    }

    explanation.push_str(". 😊");
    explanation
}

fn whole_rupees(amount: f64) -> i64 {
    amount.trunc() as i64
}
