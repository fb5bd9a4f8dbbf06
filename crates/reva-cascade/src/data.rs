// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured-data stage: entity extraction, data-source mapping, and the
//! `generate_*` handlers that answer directly from the listing data service.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use reva_context::ConversationContext;
use reva_core::{Listing, ListingDataService, RevaError};
use serde_json::{Value, json};
use tracing::debug;

static LISTING_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmls\s*#?\s*(\d+)\b").expect("listing id regex"));

static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bin\s+([A-Z][a-z]+(?:\s[A-Z][a-z]+)?)").expect("city regex")
});

static CITY_LOWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s+([a-z]+)").expect("city fallback regex"));

/// Words that follow "in" without naming a place.
const CITY_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "my", "your", "general", "total", "town", "fact", "case",
];

/// Entities pulled out of the question text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedEntities {
    pub listing_id: Option<String>,
    pub city: Option<String>,
}

/// Extract listing ids ("MLS 12345", "mls#12345") and "in <City>" phrases.
pub fn extract_entities(text: &str) -> ExtractedEntities {
    ExtractedEntities {
        listing_id: LISTING_ID_RE
            .captures(text)
            .map(|c| format!("MLS{}", &c[1])),
        city: extract_city(text),
    }
}

/// Capitalized "in New Bedford" phrases win; a lowercase single word after
/// "in" is accepted too unless it is a stop word ("in the market").
fn extract_city(text: &str) -> Option<String> {
    if let Some(c) = CITY_RE.captures(text) {
        return Some(c[1].to_string());
    }
    CITY_LOWER_RE
        .captures(text)
        .map(|c| c[1].to_string())
        .filter(|city| !CITY_STOP_WORDS.contains(&city.to_lowercase().as_str()))
}

/// What kind of structured data could answer the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    PriceLookup,
    FeatureLookup,
    Availability,
    MarketStats,
    SchoolInfo,
    Comparison,
}

/// A candidate data source with mapping confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataMapping {
    pub source: DataSourceKind,
    pub confidence: f64,
}

/// Map a question to the best data source, if any fits.
///
/// Confidence reflects how sure the mapping is that the source can answer;
/// listing-scoped sources score higher when a specific listing is in play.
pub fn map_data_source(
    question: &str,
    entities: &ExtractedEntities,
    context: &ConversationContext,
) -> Option<DataMapping> {
    let lower = question.to_lowercase();
    let has_listing = entities.listing_id.is_some() || context.active_listing.is_some();

    let mut candidates: Vec<DataMapping> = Vec::new();
    let mut push = |source, confidence| candidates.push(DataMapping { source, confidence });

    if lower.contains("price") || lower.contains("cost") || lower.contains("how much") {
        push(
            DataSourceKind::PriceLookup,
            if has_listing { 0.9 } else { 0.5 },
        );
    }
    if lower.contains("school") {
        push(
            DataSourceKind::SchoolInfo,
            if has_listing { 0.85 } else { 0.5 },
        );
    }
    if lower.contains("available") || lower.contains("still for sale") || lower.contains("status")
    {
        push(
            DataSourceKind::Availability,
            if has_listing { 0.85 } else { 0.5 },
        );
    }
    if lower.contains("bedroom")
        || lower.contains("bathroom")
        || lower.contains("square feet")
        || lower.contains("sqft")
        || lower.contains("feature")
        || lower.contains("taxes")
        || lower.contains("hoa")
    {
        push(
            DataSourceKind::FeatureLookup,
            if has_listing { 0.85 } else { 0.5 },
        );
    }
    if lower.contains("median")
        || lower.contains("average")
        || lower.contains("market")
        || lower.contains("inventory")
    {
        push(
            DataSourceKind::MarketStats,
            if entities.city.is_some() { 0.85 } else { 0.7 },
        );
    }
    if lower.contains("similar") || lower.contains("comparable") || lower.contains("like this") {
        push(
            DataSourceKind::Comparison,
            if has_listing { 0.75 } else { 0.4 },
        );
    }

    candidates
        .into_iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
}

/// Which market statistic the question asks for.
fn requested_stat(question: &str) -> &'static str {
    let lower = question.to_lowercase();
    if lower.contains("inventory") || lower.contains("how many") {
        "inventory"
    } else if lower.contains("days on market") || lower.contains("how long") {
        "days_on_market"
    } else if lower.contains("average") {
        "average_price"
    } else {
        "median_price"
    }
}

/// A stage-3 answer generated straight from structured data.
#[derive(Debug, Clone)]
pub struct DataAnswer {
    pub text: String,
    pub confidence: f64,
    pub data: Value,
}

/// Runs `generate_*` handlers against the listing data service.
pub struct DataStage {
    data: Arc<dyn ListingDataService>,
}

fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${out}")
}

impl DataStage {
    pub fn new(data: Arc<dyn ListingDataService>) -> Self {
        Self { data }
    }

    /// Run the handler for a mapped source. `None` means the data needed to
    /// answer was not there; that is "did not qualify", not an error.
    pub async fn answer(
        &self,
        question: &str,
        mapping: DataMapping,
        entities: &ExtractedEntities,
        context: &ConversationContext,
    ) -> Result<Option<DataAnswer>, RevaError> {
        debug!(source = ?mapping.source, "running structured-data handler");
        match mapping.source {
            DataSourceKind::PriceLookup => {
                let Some(listing) = self.target_listing(entities, context).await? else {
                    return Ok(None);
                };
                Ok(Some(DataAnswer {
                    text: format!(
                        "{} is listed at {}.",
                        listing.address,
                        format_price(listing.price)
                    ),
                    confidence: 0.95,
                    data: json!({ "listing_id": listing.id, "price": listing.price }),
                }))
            }
            DataSourceKind::FeatureLookup => {
                let Some(listing) = self.target_listing(entities, context).await? else {
                    return Ok(None);
                };
                Ok(Some(DataAnswer {
                    text: format!(
                        "{} has {} bedrooms and {} bathrooms across {} square feet. \
                         Annual taxes are {}{}.",
                        listing.address,
                        listing.bedrooms,
                        listing.bathrooms,
                        listing.square_feet,
                        format_price(listing.annual_taxes),
                        match listing.hoa_fee {
                            Some(fee) => format!(", with a {} monthly HOA fee", format_price(fee)),
                            None => String::new(),
                        }
                    ),
                    confidence: 0.85,
                    data: serde_json::to_value(&listing)
                        .map_err(|e| RevaError::Internal(format!("listing serialization: {e}")))?,
                }))
            }
            DataSourceKind::Availability => {
                let Some(listing) = self.target_listing(entities, context).await? else {
                    return Ok(None);
                };
                Ok(Some(DataAnswer {
                    text: format!("{} is currently {}.", listing.address, listing.status),
                    confidence: 0.9,
                    data: json!({ "listing_id": listing.id, "status": listing.status }),
                }))
            }
            DataSourceKind::SchoolInfo => {
                let Some(listing) = self.target_listing(entities, context).await? else {
                    return Ok(None);
                };
                Ok(Some(DataAnswer {
                    text: format!(
                        "{} is served by the {} district.",
                        listing.address, listing.school_district
                    ),
                    confidence: 0.85,
                    data: json!({
                        "listing_id": listing.id,
                        "school_district": listing.school_district,
                    }),
                }))
            }
            DataSourceKind::MarketStats => {
                let stat = self
                    .data
                    .market_stats(requested_stat(question), entities.city.as_deref(), None)
                    .await?;
                if stat.sample_size == 0 {
                    return Ok(None);
                }
                let scope = entities
                    .city
                    .as_deref()
                    .map(|c| format!(" in {c}"))
                    .unwrap_or_default();
                let text = match stat.stat_type.as_str() {
                    "inventory" => format!(
                        "There are {} active {}{scope} right now.",
                        stat.value as u64, stat.unit
                    ),
                    "days_on_market" => format!(
                        "Listings{scope} are averaging {} {} on market.",
                        stat.value as u64, stat.unit
                    ),
                    "average_price" => format!(
                        "The average listing price{scope} is {} across {} active listings.",
                        format_price(stat.value as u64),
                        stat.sample_size
                    ),
                    _ => format!(
                        "The median listing price{scope} is {} across {} active listings.",
                        format_price(stat.value as u64),
                        stat.sample_size
                    ),
                };
                Ok(Some(DataAnswer {
                    text,
                    confidence: 0.8,
                    data: serde_json::to_value(&stat)
                        .map_err(|e| RevaError::Internal(format!("stat serialization: {e}")))?,
                }))
            }
            DataSourceKind::Comparison => {
                let Some(listing) = self.target_listing(entities, context).await? else {
                    return Ok(None);
                };
                let comparables = self.data.similar_listings(&listing.id, 3).await?;
                if comparables.is_empty() {
                    return Ok(None);
                }
                let lines: Vec<String> = comparables
                    .iter()
                    .map(|c| format!("{} at {}", c.address, format_price(c.price)))
                    .collect();
                Ok(Some(DataAnswer {
                    text: format!(
                        "Comparable to {}: {}.",
                        listing.address,
                        lines.join("; ")
                    ),
                    confidence: 0.75,
                    data: json!({ "anchor": listing.id, "comparables": comparables }),
                }))
            }
        }
    }

    /// The listing the question is about: an explicitly named id wins,
    /// otherwise the conversation's active listing.
    async fn target_listing(
        &self,
        entities: &ExtractedEntities,
        context: &ConversationContext,
    ) -> Result<Option<Listing>, RevaError> {
        if let Some(id) = &entities.listing_id {
            return self.data.listing_details(id).await;
        }
        Ok(context.active_listing.as_ref().map(|a| a.snapshot.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reva_test_utils::MockListingService;

    #[test]
    fn extracts_listing_ids_in_common_spellings() {
        assert_eq!(
            extract_entities("what's the price of MLS 12345?").listing_id,
            Some("MLS12345".into())
        );
        assert_eq!(
            extract_entities("details for mls#12345 please").listing_id,
            Some("MLS12345".into())
        );
        assert_eq!(extract_entities("no ids here").listing_id, None);
    }

    #[test]
    fn extracts_cities_from_in_phrases() {
        assert_eq!(
            extract_entities("median price in Boston?").city,
            Some("Boston".into())
        );
        assert_eq!(extract_entities("median price here?").city, None);
    }

    #[test]
    fn extracts_lowercase_cities_but_not_stop_words() {
        assert_eq!(
            extract_entities("median price in boston?").city,
            Some("boston".into())
        );
        assert_eq!(extract_entities("what's happening in the market?").city, None);
        assert_eq!(extract_entities("is it a good time to buy in general?").city, None);
    }

    #[test]
    fn requested_stat_follows_the_question_wording() {
        assert_eq!(requested_stat("how is the inventory in Boston?"), "inventory");
        assert_eq!(requested_stat("average price in Cambridge?"), "average_price");
        assert_eq!(requested_stat("average days on market?"), "days_on_market");
        assert_eq!(requested_stat("what's the median in Boston?"), "median_price");
        assert_eq!(requested_stat("how's the market?"), "median_price");
    }

    #[test]
    fn price_question_with_listing_maps_high() {
        let entities = extract_entities("what's the price of MLS 12345?");
        let mapping =
            map_data_source("what's the price of MLS 12345?", &entities, &Default::default())
                .unwrap();
        assert_eq!(mapping.source, DataSourceKind::PriceLookup);
        assert!(mapping.confidence >= 0.9);
    }

    #[test]
    fn price_question_without_listing_maps_low() {
        let mapping = map_data_source(
            "how much do houses cost around here?",
            &Default::default(),
            &Default::default(),
        )
        .unwrap();
        assert!(mapping.confidence < 0.65);
    }

    #[test]
    fn unmappable_question_maps_to_nothing() {
        assert!(
            map_data_source(
                "tell me a joke",
                &Default::default(),
                &Default::default()
            )
            .is_none()
        );
    }

    #[test]
    fn format_price_inserts_separators() {
        assert_eq!(format_price(850_000), "$850,000");
        assert_eq!(format_price(1_450_000), "$1,450,000");
        assert_eq!(format_price(999), "$999");
    }

    #[tokio::test]
    async fn price_lookup_answers_from_the_listing_record() {
        let stage = DataStage::new(Arc::new(MockListingService::with_fixtures()));
        let entities = extract_entities("what's the price of MLS 12345?");
        let mapping = DataMapping {
            source: DataSourceKind::PriceLookup,
            confidence: 0.9,
        };
        let answer = stage
            .answer(
                "what's the price of MLS 12345?",
                mapping,
                &entities,
                &Default::default(),
            )
            .await
            .unwrap()
            .unwrap();
        assert!(answer.text.contains("$850,000"));
        assert!(answer.confidence >= 0.9);
    }

    #[tokio::test]
    async fn listing_scoped_handler_without_a_listing_does_not_qualify() {
        let stage = DataStage::new(Arc::new(MockListingService::with_fixtures()));
        let mapping = DataMapping {
            source: DataSourceKind::PriceLookup,
            confidence: 0.9,
        };
        let answer = stage
            .answer("how much is it?", mapping, &Default::default(), &Default::default())
            .await
            .unwrap();
        assert!(answer.is_none());
    }

    #[tokio::test]
    async fn market_stats_scope_to_the_extracted_city() {
        let stage = DataStage::new(Arc::new(MockListingService::with_fixtures()));
        let question = "what's the median in Boston?";
        let entities = extract_entities(question);
        let mapping = DataMapping {
            source: DataSourceKind::MarketStats,
            confidence: 0.85,
        };
        let answer = stage
            .answer(question, mapping, &entities, &Default::default())
            .await
            .unwrap()
            .unwrap();
        assert!(answer.text.contains("median"));
        assert!(answer.text.contains("in Boston"));
        assert!(answer.text.contains("3 active listings"));
    }

    #[tokio::test]
    async fn inventory_question_answers_with_a_count_not_a_price() {
        let stage = DataStage::new(Arc::new(MockListingService::with_fixtures()));
        let question = "how is the inventory in Boston?";
        let entities = extract_entities(question);
        let mapping = map_data_source(question, &entities, &Default::default()).unwrap();
        assert_eq!(mapping.source, DataSourceKind::MarketStats);

        let answer = stage
            .answer(question, mapping, &entities, &Default::default())
            .await
            .unwrap()
            .unwrap();
        assert!(answer.text.contains("3 active listings in Boston"));
        assert!(!answer.text.contains("median"));
        assert!(!answer.text.contains('$'));
        assert_eq!(answer.data["stat_type"], "inventory");
    }
}
