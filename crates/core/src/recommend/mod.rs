//! Query-to-recommendation pipeline.
//!
//! Constraint extraction → retrieval oracle → filter/dedup → rank → size. Every stage except the
//! retrieval call is a pure function; the pipeline keeps no state between requests.

pub mod constraints;
pub mod filter;
pub mod ranking;
pub mod sizing;

use std::sync::Arc;

use tracing::debug;

use crate::domain::product::RetrievedDocument;
use crate::domain::recommendation::RecommendationResult;
use crate::errors::OracleError;
use crate::lexicon::Lexicon;
use crate::retrieval::ProductRetriever;

pub use constraints::{ConstraintExtractor, ConstraintSet, SortPreference};
pub use filter::{coerce_documents, filter_candidates};
pub use ranking::rank_candidates;
pub use sizing::{size_results, NO_MATCHES_EXPLANATION};

pub const NO_DOCUMENTS_EXPLANATION: &str = "No matching products found.";

#[derive(Clone)]
pub struct Recommender {
    extractor: ConstraintExtractor,
    retriever: Arc<dyn ProductRetriever>,
}

impl Recommender {
    pub fn new(lexicon: Lexicon, retriever: Arc<dyn ProductRetriever>) -> Self {
        Self { extractor: ConstraintExtractor::new(lexicon), retriever }
    }

    pub async fn recommend(&self, query: &str) -> Result<RecommendationResult, OracleError> {
        let constraints = self.extractor.extract(query);
        debug!(
            event_name = "recommend.constraints_extracted",
            category = constraints.category.as_deref().unwrap_or("none"),
            brand = constraints.brand.as_deref().unwrap_or("none"),
            min_price = ?constraints.min_price,
            max_price = ?constraints.max_price,
            requested_count = constraints.requested_count,
            sort = ?constraints.sort,
            "extracted shopping constraints"
        );

        let documents = self.retriever.search(query).await?;
        let result = recommend_from_documents(&documents, &constraints);
        debug!(
            event_name = "recommend.completed",
            retrieved = documents.len(),
            returned = result.products.len(),
            "recommendation pipeline completed"
        );

        Ok(result)
    }
}

pub fn recommend_from_documents(
    documents: &[RetrievedDocument],
    constraints: &ConstraintSet,
) -> RecommendationResult {
    if documents.is_empty() {
        return RecommendationResult::explained(NO_DOCUMENTS_EXPLANATION);
    }

    let mut survivors = filter_candidates(coerce_documents(documents), constraints);
    rank_candidates(&mut survivors, constraints.sort);
    size_results(survivors, constraints)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use super::{Recommender, NO_DOCUMENTS_EXPLANATION, NO_MATCHES_EXPLANATION};
    use crate::domain::product::RetrievedDocument;
    use crate::errors::{Oracle, OracleError};
    use crate::lexicon::Lexicon;
    use crate::retrieval::{ProductRetriever, StaticRetriever};

    struct FailingRetriever;

    #[async_trait]
    impl ProductRetriever for FailingRetriever {
        async fn search(&self, _query: &str) -> Result<Vec<RetrievedDocument>, OracleError> {
            Err(OracleError::Unavailable {
                oracle: Oracle::Retrieval,
                message: "connection refused".to_string(),
            })
        }
    }

    fn document(title: &str, summary: &str, rating: &str, price: &str) -> RetrievedDocument {
        serde_json::from_value(json!({
            "page_content": format!("Product: {title}"),
            "metadata": {
                "title": title,
                "summary": summary,
                "rating": rating,
                "price": price,
            }
        }))
        .expect("fixture document should deserialize")
    }

    fn catalog() -> Vec<RetrievedDocument> {
        vec![
            document("Redmi Note 13 Phone", "AMOLED display", "4.2", "17999"),
            document("Samsung Galaxy S24 Phone", "Flagship", "4.8", "74999"),
            document("Lenovo IdeaPad Laptop", "Office laptop", "4.4", "15999"),
            document("Realme Narzo Phone", "Gaming phone", "4.5", "12999"),
            document("realme narzo phone", "Duplicate listing", "4.9", "11999"),
            document("Poco M6 Phone", "Entry level", "n/a", "9999"),
            document("Vivo T3 Phone", "Slim", "4.6", "19999"),
        ]
    }

    fn recommender(documents: Vec<RetrievedDocument>) -> Recommender {
        Recommender::new(Lexicon::default(), Arc::new(StaticRetriever::new(documents)))
    }

    #[tokio::test]
    async fn best_phones_under_limit_are_filtered_and_ranked_by_rating() {
        let result = recommender(catalog())
            .recommend("best phones under 20000")
            .await
            .expect("static retrieval should succeed");

        let titles: Vec<&str> =
            result.products.iter().map(|product| product.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Vivo T3 Phone", "Realme Narzo Phone", "Redmi Note 13 Phone", "Poco M6 Phone"]
        );
        assert!(result.products.iter().all(|product| product.price <= 20000.0));
        assert_eq!(result.explanation, "I could only find 4 matching phone under ₹20000. 😊");
    }

    #[tokio::test]
    async fn cheapest_query_sorts_by_price() {
        let result = recommender(catalog())
            .recommend("cheapest 2 phones")
            .await
            .expect("static retrieval should succeed");

        assert_eq!(result.explanation, "");
        assert_eq!(result.products.len(), 2);
        assert_eq!(result.products[0].title, "Poco M6 Phone");
        assert_eq!(result.products[0].rating, 0.0);
        assert_eq!(result.products[1].title, "Realme Narzo Phone");
    }

    #[tokio::test]
    async fn impossible_filters_report_no_matches() {
        let result = recommender(catalog())
            .recommend("sony phones")
            .await
            .expect("static retrieval should succeed");

        assert_eq!(result.explanation, NO_MATCHES_EXPLANATION);
        assert!(result.products.is_empty());
    }

    #[tokio::test]
    async fn empty_retrieval_is_reported_separately() {
        let result = recommender(Vec::new())
            .recommend("phones")
            .await
            .expect("static retrieval should succeed");

        assert_eq!(result.explanation, NO_DOCUMENTS_EXPLANATION);
        assert!(result.products.is_empty());
    }

    #[tokio::test]
    async fn retrieval_failure_is_returned_to_caller() {
        let recommender = Recommender::new(Lexicon::default(), Arc::new(FailingRetriever));
        let error = recommender.recommend("phones").await.expect_err("retrieval should fail");

        assert_eq!(error.oracle(), Oracle::Retrieval);
    }
}
