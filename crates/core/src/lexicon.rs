//! Keyword tables used by constraint extraction and ranking.
//!
//! The lexicon is built once at startup and shared read-only. Table order is significant:
//! the first matching category or brand wins.

use serde::{Deserialize, Serialize};

pub const QUALITY_KEYWORDS: [&str; 5] = ["best", "top", "good", "high", "recommended"];
pub const BUDGET_KEYWORDS: [&str; 3] = ["cheapest", "lowest", "budget"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub categories: Vec<CategoryRule>,
    pub brands: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryRule::new("phone", &["phone", "mobile", "smartphone"]),
                CategoryRule::new("laptop", &["laptop", "notebook"]),
                CategoryRule::new("tv", &["tv", "television", "led", "smart tv"]),
                CategoryRule::new("earbuds", &["earbud", "earphone", "headphone"]),
                CategoryRule::new("camera", &["camera", "dslr"]),
                CategoryRule::new("watch", &["watch", "smartwatch"]),
                CategoryRule::new("ac", &["ac", "air conditioner"]),
                CategoryRule::new("fridge", &["fridge", "refrigerator"]),
            ],
            brands: [
                "samsung",
                "apple",
                "realme",
                "redmi",
                "mi",
                "poco",
                "vivo",
                "oppo",
                "oneplus",
                "asus",
                "lenovo",
                "dell",
                "hp",
                "acer",
                "boat",
                "noise",
                "boult",
                "panasonic",
                "lg",
                "sony",
                "philips",
                "whirlpool",
                "godrej",
            ]
            .iter()
            .map(|brand| brand.to_string())
            .collect(),
        }
    }
}

impl Lexicon {
    /// Builds a lexicon with every entry lower-cased so lookups can run against lower-cased text.
    pub fn new(categories: Vec<CategoryRule>, brands: Vec<String>) -> Self {
        let categories = categories
            .into_iter()
            .map(|rule| CategoryRule {
                name: rule.name.trim().to_lowercase(),
                keywords: rule
                    .keywords
                    .into_iter()
                    .map(|keyword| keyword.trim().to_lowercase())
                    .filter(|keyword| !keyword.is_empty())
                    .collect(),
            })
            .collect();
        let brands = brands
            .into_iter()
            .map(|brand| brand.trim().to_lowercase())
            .filter(|brand| !brand.is_empty())
            .collect();
        Self { categories, brands }
    }

    pub fn match_category(&self, lowered_text: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| lowered_text.contains(keyword.as_str())))
            .map(|rule| rule.name.as_str())
    }

    pub fn match_brand(&self, lowered_text: &str) -> Option<&str> {
        self.brands.iter().find(|brand| lowered_text.contains(brand.as_str())).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryRule, Lexicon};

    #[test]
    fn first_category_in_table_order_wins() {
        let lexicon = Lexicon::default();
        // "headphone" contains "phone", and phone is listed before earbuds.
        assert_eq!(lexicon.match_category("wireless headphones"), Some("phone"));
        assert_eq!(lexicon.match_category("a dslr for travel"), Some("camera"));
        assert_eq!(lexicon.match_category("something else"), None);
    }

    #[test]
    fn brand_match_is_substring_based() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.match_brand("samsung galaxy"), Some("samsung"));
        // "mi" is embedded in "premium"; accepted behavior.
        assert_eq!(lexicon.match_brand("premium pick"), Some("mi"));
        assert_eq!(lexicon.match_brand("generic"), None);
    }

    #[test]
    fn custom_lexicon_is_normalized() {
        let lexicon = Lexicon::new(
            vec![
                CategoryRule::new(" Tablet ", &["Tablet", " iPad ", "", " "]),
                CategoryRule::new("phone", &["phone"]),
            ],
            vec![" Apple ".to_string(), String::new()],
        );

        assert_eq!(lexicon.categories[0].name, "tablet");
        assert_eq!(lexicon.categories[0].keywords, vec!["tablet", "ipad"]);
        assert_eq!(lexicon.brands, vec!["apple"]);
        assert_eq!(lexicon.match_category("cheap ipad"), Some("tablet"));
        // Whitespace-only keywords must not match every multi-word query.
        assert_eq!(lexicon.match_category("best phones"), Some("phone"));
    }
}
