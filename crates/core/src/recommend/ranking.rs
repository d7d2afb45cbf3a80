use crate::domain::product::Candidate;
use crate::recommend::constraints::SortPreference;

/// Stable sort: candidates with equal keys keep their retrieval order.
pub fn rank_candidates(candidates: &mut [Candidate], sort: SortPreference) {
    match sort {
        SortPreference::Quality | SortPreference::Default => {
            candidates.sort_by(|left, right| right.rating.total_cmp(&left.rating));
        }
        SortPreference::Budget => {
            candidates.sort_by(|left, right| left.price.total_cmp(&right.price));
        }
    }
}
