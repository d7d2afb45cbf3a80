use std::collections::HashSet;

use crate::domain::product::{Candidate, RetrievedDocument};
use crate::recommend::constraints::ConstraintSet;

pub fn coerce_documents(documents: &[RetrievedDocument]) -> Vec<Candidate> {
    documents.iter().map(Candidate::from_document).collect()
}

/// Applies category, brand and price predicates, then drops repeated titles.
///
/// Relative order of the input is preserved. Running the filter on its own output returns the
/// same list.
pub fn filter_candidates(candidates: Vec<Candidate>, constraints: &ConstraintSet) -> Vec<Candidate> {
    let mut seen_titles = HashSet::new();

    candidates
        .into_iter()
        .filter(|candidate| matches_constraints(candidate, constraints))
        .filter(|candidate| seen_titles.insert(candidate.title.to_lowercase()))
        .collect()
}

pub fn matches_constraints(candidate: &Candidate, constraints: &ConstraintSet) -> bool {
    let title = candidate.title.to_lowercase();
    let summary = candidate.summary.to_lowercase();
    let mentions = |needle: &str| title.contains(needle) || summary.contains(needle);

    // Only the canonical category name is checked here, not its extraction synonyms.
    if let Some(category) = constraints.category.as_deref() {
        if !mentions(category) {
            return false;
        }
    }

    if let Some(brand) = constraints.brand.as_deref() {
        if !mentions(brand) {
            return false;
        }
    }

    within_price(candidate.price, constraints.min_price, constraints.max_price)
}

fn within_price(price: f64, min_price: Option<f64>, max_price: Option<f64>) -> bool {
    if max_price.is_some_and(|max| price > max) {
        return false;
    }
    if min_price.is_some_and(|min| price < min) {
        return false;
    }
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if !(min..=max).contains(&price) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{filter_candidates, within_price};
    use crate::domain::product::Candidate;
    use crate::recommend::constraints::ConstraintSet;

    fn candidate(title: &str, summary: &str, rating: f64, price: f64) -> Candidate {
        Candidate {
            title: title.to_string(),
            summary: summary.to_string(),
            rating,
            price,
            image_url: None,
        }
    }

    fn catalog() -> Vec<Candidate> {
        vec![
            candidate("Samsung Galaxy M14 Phone", "5G phone", 4.2, 13999.0),
            candidate("Apple iPhone 15", "Flagship phone", 4.7, 79999.0),
            candidate("Dell Inspiron Laptop", "Thin and light", 4.3, 55999.0),
            candidate("SAMSUNG GALAXY M14 PHONE", "duplicate listing", 3.0, 12999.0),
            candidate("Redmi 13C", "Budget smartphone with big battery", 4.0, 8999.0),
            candidate("boAt Airdopes", "Wireless earbuds", 3.9, 1299.0),
        ]
    }

    #[test]
    fn category_filter_checks_title_and_summary() {
        let constraints =
            ConstraintSet { category: Some("phone".to_string()), ..ConstraintSet::default() };
        let titles: Vec<String> = filter_candidates(catalog(), &constraints)
            .into_iter()
            .map(|candidate| candidate.title)
            .collect();

        assert_eq!(
            titles,
            vec![
                "Samsung Galaxy M14 Phone".to_string(),
                "Apple iPhone 15".to_string(),
                "Redmi 13C".to_string(),
            ]
        );
    }

    #[test]
    fn brand_and_price_filters_combine() {
        let constraints = ConstraintSet {
            brand: Some("samsung".to_string()),
            max_price: Some(13000.0),
            ..ConstraintSet::default()
        };
        let survivors = filter_candidates(catalog(), &constraints);

        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].title, "SAMSUNG GALAXY M14 PHONE");
    }

    #[test]
    fn duplicate_titles_keep_first_occurrence() {
        let survivors = filter_candidates(catalog(), &ConstraintSet::default());
        let duplicates: Vec<&Candidate> = survivors
            .iter()
            .filter(|candidate| candidate.title.to_lowercase() == "samsung galaxy m14 phone")
            .collect();

        assert_eq!(survivors.len(), 5);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].price, 13999.0);
        assert_eq!(duplicates[0].summary, "5G phone");
    }

    #[test]
    fn filtering_is_idempotent() {
        let constraints = ConstraintSet {
            category: Some("phone".to_string()),
            min_price: Some(5000.0),
            ..ConstraintSet::default()
        };
        let once = filter_candidates(catalog(), &constraints);
        let twice = filter_candidates(once.clone(), &constraints);

        assert_eq!(once, twice);
    }

    #[test]
    fn reversed_bounds_yield_empty_result_instead_of_error() {
        let constraints = ConstraintSet {
            min_price: Some(60000.0),
            max_price: Some(40000.0),
            ..ConstraintSet::default()
        };

        assert!(filter_candidates(catalog(), &constraints).is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        assert!(within_price(100.0, Some(100.0), Some(200.0)));
        assert!(within_price(200.0, Some(100.0), Some(200.0)));
        assert!(!within_price(200.5, Some(100.0), Some(200.0)));
        assert!(!within_price(99.0, Some(100.0), None));
        assert!(within_price(0.0, None, Some(10.0)));
        assert!(within_price(123.0, None, None));
    }
}
