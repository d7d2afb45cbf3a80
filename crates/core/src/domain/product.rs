use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw record as returned by the retrieval oracle, before any coercion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    #[serde(default)]
    pub page_content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl RetrievedDocument {
    pub fn text_field(&self, key: &str) -> String {
        match self.metadata.get(key) {
            Some(Value::String(value)) => value.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn numeric_field(&self, key: &str) -> f64 {
        coerce_number(self.metadata.get(key))
    }
}

/// A product candidate with numeric fields already coerced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub summary: String,
    pub rating: f64,
    pub price: f64,
    pub image_url: Option<String>,
}

impl Candidate {
    pub fn from_document(document: &RetrievedDocument) -> Self {
        let image_url = document.text_field("image_url");
        Self {
            title: document.text_field("title"),
            summary: document.text_field("summary"),
            rating: document.numeric_field("rating"),
            price: document.numeric_field("price"),
            image_url: (!image_url.trim().is_empty()).then_some(image_url),
        }
    }
}

/// Missing, unparsable, negative or non-finite values all coerce to `0.0`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(number) if number.is_finite() && number >= 0.0 => number,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{coerce_number, Candidate, RetrievedDocument};

    fn document(metadata: serde_json::Value) -> RetrievedDocument {
        serde_json::from_value(json!({ "page_content": "", "metadata": metadata }))
            .expect("fixture document should deserialize")
    }

    #[test]
    fn numeric_metadata_accepts_numbers_and_strings() {
        let candidate = Candidate::from_document(&document(json!({
            "title": "Redmi Note 13",
            "summary": "Good battery",
            "rating": "4.3",
            "price": 15999,
            "image_url": "https://img.example/redmi.jpg"
        })));

        assert_eq!(candidate.title, "Redmi Note 13");
        assert_eq!(candidate.rating, 4.3);
        assert_eq!(candidate.price, 15999.0);
        assert_eq!(candidate.image_url.as_deref(), Some("https://img.example/redmi.jpg"));
    }

    #[test]
    fn malformed_numbers_coerce_to_zero_instead_of_failing() {
        let candidate = Candidate::from_document(&document(json!({
            "title": "Mystery Phone",
            "rating": "four stars",
            "price": null
        })));

        assert_eq!(candidate.rating, 0.0);
        assert_eq!(candidate.price, 0.0);
        assert_eq!(candidate.summary, "");
        assert!(candidate.image_url.is_none());
    }

    #[test]
    fn non_finite_and_negative_values_coerce_to_zero() {
        assert_eq!(coerce_number(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce_number(Some(&json!("inf"))), 0.0);
        assert_eq!(coerce_number(Some(&json!(-3.5))), 0.0);
        assert_eq!(coerce_number(Some(&json!(" 12.5 "))), 12.5);
        assert_eq!(coerce_number(Some(&json!(true))), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }
}
