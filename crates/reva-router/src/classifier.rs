// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query-type classification.
//!
//! Classifies user messages into the four query types using pattern rules
//! with a fixed precedence order. No LLM pre-call, no network, no latency.

use std::sync::LazyLock;

use regex::Regex;
use reva_core::QueryKind;

/// Greeting/closing patterns (exact match, case-insensitive).
const SIMPLE_EXACT: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "thanks",
    "thank you",
    "thanks!",
    "thank you!",
    "bye",
    "goodbye",
    "see you",
    "ok",
    "okay",
    "yes",
    "no",
];

/// Property-search lexicon (contains, case-insensitive).
const SEARCH_INDICATORS: &[&str] = &[
    "looking for",
    "look for",
    "search",
    "find me",
    "show me",
    "do you have",
    "are there",
    "any homes",
    "any houses",
    "any condos",
    "bedroom",
    "bathroom",
    "bed ",
    "bath ",
    "price range",
    "under $",
    "over $",
    "budget",
    "house",
    "condo",
    "townhouse",
    "apartment",
    "for sale",
    "listing",
    "listings",
    "property",
    "properties",
];

/// Market/statistics lexicon (contains, case-insensitive).
const MARKET_INDICATORS: &[&str] = &[
    "market",
    "trend",
    "trends",
    "average price",
    "median",
    "inventory",
    "cma",
    "comparative market",
    "forecast",
    "appreciation",
    "days on market",
    "price per square foot",
];

/// Detail/follow-up lexicon (contains, case-insensitive).
const FOLLOW_UP_INDICATORS: &[&str] = &[
    "tell me more",
    "more about",
    "what about",
    "more details",
    "more info",
];

static NUMBERED_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^#?\d+$|\bnumber\s+\d+\b|\b(?:first|second|third|fourth|fifth)\s+one\b|\bthe\s+\d+(?:st|nd|rd|th)\s+one\b",
    )
    .expect("numbered reference regex")
});

static STREET_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d+\s+\w+\s+(?:street|st|avenue|ave|road|rd|drive|dr|lane|ln|boulevard|blvd|court|ct|way|place|pl)\b",
    )
    .expect("street address regex")
});

/// Pattern-based query classifier. First match wins, in a fixed precedence
/// order; the default is `general`.
#[derive(Debug, Default)]
pub struct QueryClassifier;

impl QueryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message. Pure function of the input text.
    pub fn classify(&self, message: &str) -> QueryKind {
        let trimmed = message.trim();
        let lower = trimmed.to_lowercase();
        let bare = lower.trim_end_matches(['!', '.', '?']);

        if bare.is_empty() || SIMPLE_EXACT.iter().any(|p| bare == *p) {
            return QueryKind::Simple;
        }
        if SEARCH_INDICATORS.iter().any(|p| lower.contains(p)) {
            return QueryKind::PropertySearch;
        }
        if MARKET_INDICATORS.iter().any(|p| lower.contains(p)) {
            return QueryKind::MarketAnalysis;
        }
        if FOLLOW_UP_INDICATORS.iter().any(|p| lower.contains(p)) {
            return QueryKind::PropertySearch;
        }
        if NUMBERED_REFERENCE_RE.is_match(trimmed) {
            return QueryKind::PropertySearch;
        }
        if STREET_ADDRESS_RE.is_match(trimmed) {
            return QueryKind::PropertySearch;
        }
        QueryKind::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_greetings_and_closings() {
        let c = QueryClassifier::new();
        assert_eq!(c.classify("hi"), QueryKind::Simple);
        assert_eq!(c.classify("Hello!"), QueryKind::Simple);
        assert_eq!(c.classify("thank you"), QueryKind::Simple);
        assert_eq!(c.classify("  bye  "), QueryKind::Simple);
        assert_eq!(c.classify(""), QueryKind::Simple);
    }

    #[test]
    fn classify_property_searches() {
        let c = QueryClassifier::new();
        assert_eq!(
            c.classify("I'm looking for a 2 bedroom in Back Bay"),
            QueryKind::PropertySearch
        );
        assert_eq!(
            c.classify("do you have anything under $800k?"),
            QueryKind::PropertySearch
        );
        assert_eq!(
            c.classify("show me condos in Cambridge"),
            QueryKind::PropertySearch
        );
    }

    #[test]
    fn classify_market_questions() {
        let c = QueryClassifier::new();
        assert_eq!(
            c.classify("how is the Boston real estate market trending?"),
            QueryKind::MarketAnalysis
        );
        assert_eq!(
            c.classify("what's the median in Cambridge?"),
            QueryKind::MarketAnalysis
        );
    }

    #[test]
    fn search_lexicon_outranks_market_lexicon() {
        // "average price for a condo" carries both; search wins by precedence.
        let c = QueryClassifier::new();
        assert_eq!(
            c.classify("average price for a condo in Back Bay"),
            QueryKind::PropertySearch
        );
    }

    #[test]
    fn classify_follow_ups_as_search() {
        let c = QueryClassifier::new();
        assert_eq!(c.classify("tell me more"), QueryKind::PropertySearch);
        assert_eq!(
            c.classify("what about the taxes?"),
            QueryKind::PropertySearch
        );
    }

    #[test]
    fn classify_numbered_references_as_search() {
        let c = QueryClassifier::new();
        assert_eq!(c.classify("#2"), QueryKind::PropertySearch);
        assert_eq!(c.classify("3"), QueryKind::PropertySearch);
        assert_eq!(c.classify("number 4 please"), QueryKind::PropertySearch);
        assert_eq!(c.classify("the second one"), QueryKind::PropertySearch);
        assert_eq!(c.classify("the 3rd one"), QueryKind::PropertySearch);
    }

    #[test]
    fn classify_street_addresses_as_search() {
        let c = QueryClassifier::new();
        assert_eq!(c.classify("123 Beacon Street"), QueryKind::PropertySearch);
        assert_eq!(c.classify("45 Oak Ave"), QueryKind::PropertySearch);
    }

    #[test]
    fn everything_else_is_general() {
        let c = QueryClassifier::new();
        assert_eq!(
            c.classify("can you explain how escrow works?"),
            QueryKind::General
        );
        assert_eq!(c.classify("who pays the closing costs?"), QueryKind::General);
    }
}
