//! Deterministic extraction of structured shopping constraints from free text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{Lexicon, BUDGET_KEYWORDS, QUALITY_KEYWORDS};

pub const DEFAULT_REQUESTED_COUNT: usize = 5;

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+\b").expect("count regex is valid"));
static BETWEEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"between\s*([0-9]+)\s*(?:and|to)\s*([0-9]+)").expect("between regex is valid")
});
static UNDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"under\s*([0-9]+)").expect("under regex is valid"));
static ABOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"above\s*([0-9]+)").expect("above regex is valid"));
static QUALITY_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(&QUALITY_KEYWORDS).expect("quality keyword regex is valid"));
static BUDGET_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(&BUDGET_KEYWORDS).expect("budget keyword regex is valid"));

fn keyword_regex(keywords: &[&str]) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b({})\b", keywords.join("|")))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPreference {
    Quality,
    Budget,
    #[default]
    Default,
}

impl SortPreference {
    pub fn detect(lowered_query: &str) -> Self {
        if QUALITY_RE.is_match(lowered_query) {
            Self::Quality
        } else if BUDGET_RE.is_match(lowered_query) {
            Self::Budget
        } else {
            Self::Default
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub requested_count: usize,
    pub sort: SortPreference,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            category: None,
            brand: None,
            min_price: None,
            max_price: None,
            requested_count: DEFAULT_REQUESTED_COUNT,
            sort: SortPreference::Default,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConstraintExtractor {
    lexicon: Lexicon,
}

impl ConstraintExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn extract(&self, query: &str) -> ConstraintSet {
        let lowered = query.to_lowercase();

        let category = self.lexicon.match_category(&lowered).map(str::to_string);
        let brand = self.lexicon.match_brand(&lowered).map(str::to_string);
        let price = extract_price_bounds(&lowered);
        // "phones under 20000" keeps the default count: 20000 is the price, not a count.
        let requested_count = extract_requested_count(&lowered, price.span.as_ref());
        let sort = SortPreference::detect(&lowered);

        ConstraintSet {
            category,
            brand,
            min_price: price.min,
            max_price: price.max,
            requested_count,
            sort,
        }
    }
}

#[derive(Debug, Default)]
struct PriceBounds {
    min: Option<f64>,
    max: Option<f64>,
    span: Option<Range<usize>>,
}

fn extract_price_bounds(lowered: &str) -> PriceBounds {
    if let Some(captures) = BETWEEN_RE.captures(lowered) {
        return PriceBounds {
            min: captures.get(1).and_then(|value| parse_amount(value.as_str())),
            max: captures.get(2).and_then(|value| parse_amount(value.as_str())),
            span: captures.get(0).map(|whole| whole.range()),
        };
    }

    if let Some(captures) = UNDER_RE.captures(lowered) {
        return PriceBounds {
            min: None,
            max: captures.get(1).and_then(|value| parse_amount(value.as_str())),
            span: captures.get(0).map(|whole| whole.range()),
        };
    }

    if let Some(captures) = ABOVE_RE.captures(lowered) {
        return PriceBounds {
            min: captures.get(1).and_then(|value| parse_amount(value.as_str())),
            max: None,
            span: captures.get(0).map(|whole| whole.range()),
        };
    }

    PriceBounds::default()
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Numbers that belong to the price phrase are amounts, not counts.
fn extract_requested_count(lowered: &str, price_span: Option<&Range<usize>>) -> usize {
    COUNT_RE
        .find_iter(lowered)
        .find(|token| {
            price_span.map_or(true, |span| token.start() < span.start || token.end() > span.end)
        })
        .map(|token| token.as_str().parse::<usize>().unwrap_or(usize::MAX).max(1))
        .unwrap_or(DEFAULT_REQUESTED_COUNT)
}
