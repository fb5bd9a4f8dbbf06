// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool execution against the listing data service and conversation context.
//!
//! Each handler is a typed function reached through the `ToolKind` dispatch
//! table. Handlers that change what the conversation is about (searches,
//! detail lookups, reference resolution) write the context back through the
//! store before returning.

use std::sync::Arc;

use async_trait::async_trait;
use reva_core::types::{AgentInquiry, PropertyCategory, SearchCriteria, TourRequest};
use reva_core::{
    ConversationId, ListingDataService, RevaError, ToolCallRequest, ToolExecutor, ToolOutcome,
};
use reva_context::{ContextStore, ConversationContext, ShownListing};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::defs::ToolKind;

/// Executes the closed tool set against the domain data service, reading
/// and writing the conversation context as a side effect.
pub struct ListingToolExecutor {
    data: Arc<dyn ListingDataService>,
    store: Arc<dyn ContextStore>,
}

/// Upper bound on reload-and-reapply rounds when a context save loses the
/// optimistic-version race against another tool call in the same iteration.
const SAVE_RETRIES: u32 = 3;

#[derive(Debug, Deserialize)]
struct MarketStatsArgs {
    stat_type: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    property_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsArgs {
    listing_id: String,
}

#[derive(Debug, Deserialize)]
struct NeighborhoodArgs {
    neighborhood: String,
}

#[derive(Debug, Deserialize)]
struct PriceTrendsArgs {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    property_type: Option<String>,
    #[serde(default = "default_timeframe_months")]
    timeframe_months: u32,
}

fn default_timeframe_months() -> u32 {
    6
}

#[derive(Debug, Deserialize)]
struct SimilarArgs {
    listing_id: String,
    #[serde(default = "default_similar_count")]
    count: usize,
}

fn default_similar_count() -> usize {
    3
}

#[derive(Debug, Deserialize)]
struct TextSearchArgs {
    query: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceArgs {
    reference: String,
}

#[derive(Debug, Deserialize)]
struct CategoryArgs {
    category: PropertyCategory,
}

impl ListingToolExecutor {
    pub fn new(data: Arc<dyn ListingDataService>, store: Arc<dyn ContextStore>) -> Self {
        Self { data, store }
    }

    /// Load, mutate, and save the context, retrying on a version conflict.
    ///
    /// Tool calls in one iteration run concurrently, so two mutating calls
    /// can race on the same conversation; the loser reloads the fresh
    /// context and reapplies its mutation instead of failing the call.
    /// Returns the context as saved.
    async fn mutate_context(
        &self,
        conversation: &ConversationId,
        mut apply: impl FnMut(&mut ConversationContext),
    ) -> Result<ConversationContext, RevaError> {
        let mut attempt = 0;
        loop {
            let mut ctx = self.store.load(conversation).await?;
            apply(&mut ctx.value);
            let saved = ctx.value.clone();
            match self.store.save(conversation, ctx).await {
                Ok(_) => return Ok(saved),
                Err(RevaError::ContextVersionConflict { .. }) if attempt < SAVE_RETRIES => {
                    attempt += 1;
                    debug!(
                        conversation = conversation.as_str(),
                        attempt, "context save lost a version race; reapplying"
                    );
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn search_properties(
        &self,
        conversation: &ConversationId,
        criteria: SearchCriteria,
    ) -> Result<ToolOutcome, RevaError> {
        let mut merged = self.store.load(conversation).await?.value.search_criteria;
        merged.merge_from(&criteria);
        let results = self.data.search(&merged).await?;

        let ctx = self
            .mutate_context(conversation, |ctx| {
                ctx.update_search_criteria(&criteria);
                ctx.record_shown_listings(results.clone());
            })
            .await?;

        Ok(ToolOutcome::ok(json!({
            "count": ctx.shown_listings.len(),
            "results": shown_to_json(&ctx.shown_listings),
        })))
    }

    async fn text_search(
        &self,
        conversation: &ConversationId,
        args: TextSearchArgs,
    ) -> Result<ToolOutcome, RevaError> {
        let results = self.data.text_search(&args.query).await?;
        let ctx = self
            .mutate_context(conversation, |ctx| {
                ctx.record_shown_listings(results.clone())
            })
            .await?;

        Ok(ToolOutcome::ok(json!({
            "count": ctx.shown_listings.len(),
            "results": shown_to_json(&ctx.shown_listings),
        })))
    }

    async fn property_details(
        &self,
        conversation: &ConversationId,
        args: DetailsArgs,
    ) -> Result<ToolOutcome, RevaError> {
        match self.data.listing_details(&args.listing_id).await? {
            Some(listing) => {
                self.mutate_context(conversation, |ctx| ctx.set_active_listing(listing.clone()))
                    .await?;
                Ok(ToolOutcome::ok(serde_json::to_value(&listing).map_err(
                    |e| RevaError::Internal(format!("listing serialization: {e}")),
                )?))
            }
            None => Ok(ToolOutcome::error(format!(
                "no listing with id {}",
                args.listing_id
            ))),
        }
    }

    async fn resolve_property_reference(
        &self,
        conversation: &ConversationId,
        args: ReferenceArgs,
    ) -> Result<ToolOutcome, RevaError> {
        let ctx = self.store.load(conversation).await?;
        let listing_id = ctx
            .value
            .resolve_reference(&args.reference)
            .map(|s| s.listing_id.clone())
            .ok_or(RevaError::ReferenceUnresolved {
                reference: args.reference.clone(),
            })?;

        self.property_details(conversation, DetailsArgs { listing_id })
            .await
    }

    async fn property_category(
        &self,
        conversation: &ConversationId,
        args: CategoryArgs,
    ) -> Result<ToolOutcome, RevaError> {
        let ctx = self.store.load(conversation).await?;
        let Some(active) = &ctx.value.active_listing else {
            return Ok(ToolOutcome::error(
                "no property is being discussed yet; look one up first",
            ));
        };
        let p = &active.snapshot;

        let fields = match args.category {
            PropertyCategory::Basic => json!({
                "address": p.address,
                "city": p.city,
                "price": p.price,
                "bedrooms": p.bedrooms,
                "bathrooms": p.bathrooms,
                "property_type": p.property_type,
                "square_feet": p.square_feet,
                "status": p.status,
            }),
            PropertyCategory::Financial => json!({
                "price": p.price,
                "annual_taxes": p.annual_taxes,
                "hoa_fee": p.hoa_fee,
            }),
            PropertyCategory::Location => json!({
                "address": p.address,
                "city": p.city,
                "neighborhood": p.neighborhood,
            }),
            PropertyCategory::Features => json!({
                "features": p.features,
                "year_built": p.year_built,
                "square_feet": p.square_feet,
                "description": p.description,
            }),
            PropertyCategory::Schools => json!({
                "school_district": p.school_district,
            }),
        };

        Ok(ToolOutcome::ok(json!({
            "listing_id": active.listing_id,
            "category": args.category,
            "fields": fields,
        })))
    }

    async fn schedule_tour(
        &self,
        conversation: &ConversationId,
        request: TourRequest,
    ) -> Result<ToolOutcome, RevaError> {
        self.mutate_context(conversation, |ctx| {
            ctx.collected_info.record(
                Some(&request.name),
                Some(&request.email),
                Some(&request.phone),
                None,
            );
        })
        .await?;

        let confirmation = self.data.schedule_tour(&request).await?;
        Ok(ToolOutcome::ok(json!({
            "confirmation_id": confirmation.confirmation_id,
            "listing_id": confirmation.listing_id,
            "scheduled_for": confirmation.scheduled_for,
        })))
    }

    async fn contact_agent(
        &self,
        conversation: &ConversationId,
        inquiry: AgentInquiry,
    ) -> Result<ToolOutcome, RevaError> {
        self.mutate_context(conversation, |ctx| {
            ctx.collected_info.record(
                Some(&inquiry.name),
                Some(&inquiry.email),
                inquiry.phone.as_deref(),
                None,
            );
        })
        .await?;

        let confirmation = self.data.contact_agent(&inquiry).await?;
        Ok(ToolOutcome::ok(json!({
            "confirmation_id": confirmation.confirmation_id,
        })))
    }
}

#[async_trait]
impl ToolExecutor for ListingToolExecutor {
    async fn execute(
        &self,
        conversation: &ConversationId,
        call: &ToolCallRequest,
    ) -> Result<ToolOutcome, RevaError> {
        let kind = ToolKind::from_name(&call.name).ok_or_else(|| RevaError::UnknownTool {
            name: call.name.clone(),
        })?;
        debug!(
            conversation = conversation.as_str(),
            tool = kind.name(),
            "executing tool call"
        );

        match kind {
            ToolKind::SearchProperties => {
                let criteria: SearchCriteria = parse_args(kind, &call.arguments)?;
                self.search_properties(conversation, criteria).await
            }
            ToolKind::GetMarketStats => {
                let args: MarketStatsArgs = parse_args(kind, &call.arguments)?;
                let stat = self
                    .data
                    .market_stats(
                        &args.stat_type,
                        args.city.as_deref(),
                        args.property_type.as_deref(),
                    )
                    .await?;
                Ok(ToolOutcome::ok(serde_json::to_value(&stat).map_err(
                    |e| RevaError::Internal(format!("stat serialization: {e}")),
                )?))
            }
            ToolKind::GetPropertyDetails => {
                let args: DetailsArgs = parse_args(kind, &call.arguments)?;
                self.property_details(conversation, args).await
            }
            ToolKind::GetNeighborhoodInfo => {
                let args: NeighborhoodArgs = parse_args(kind, &call.arguments)?;
                match self.data.neighborhood_info(&args.neighborhood).await? {
                    Some(info) => Ok(ToolOutcome::ok(serde_json::to_value(&info).map_err(
                        |e| RevaError::Internal(format!("neighborhood serialization: {e}")),
                    )?)),
                    None => Ok(ToolOutcome::error(format!(
                        "no data for neighborhood {}",
                        args.neighborhood
                    ))),
                }
            }
            ToolKind::GetPriceTrends => {
                let args: PriceTrendsArgs = parse_args(kind, &call.arguments)?;
                let series = self
                    .data
                    .price_trends(
                        args.city.as_deref(),
                        args.property_type.as_deref(),
                        args.timeframe_months,
                    )
                    .await?;
                Ok(ToolOutcome::ok(json!({ "months": series })))
            }
            ToolKind::FindSimilarProperties => {
                let args: SimilarArgs = parse_args(kind, &call.arguments)?;
                let comparables = self
                    .data
                    .similar_listings(&args.listing_id, args.count)
                    .await?;
                Ok(ToolOutcome::ok(json!({
                    "count": comparables.len(),
                    "comparables": comparables,
                })))
            }
            ToolKind::TextSearch => {
                let args: TextSearchArgs = parse_args(kind, &call.arguments)?;
                self.text_search(conversation, args).await
            }
            ToolKind::ScheduleTour => {
                let request: TourRequest = parse_args(kind, &call.arguments)?;
                self.schedule_tour(conversation, request).await
            }
            ToolKind::ContactAgent => {
                let inquiry: AgentInquiry = parse_args(kind, &call.arguments)?;
                self.contact_agent(conversation, inquiry).await
            }
            ToolKind::ResolvePropertyReference => {
                let args: ReferenceArgs = parse_args(kind, &call.arguments)?;
                self.resolve_property_reference(conversation, args).await
            }
            ToolKind::GetPropertyCategory => {
                let args: CategoryArgs = parse_args(kind, &call.arguments)?;
                self.property_category(conversation, args).await
            }
        }
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(
    kind: ToolKind,
    arguments: &serde_json::Value,
) -> Result<T, RevaError> {
    serde_json::from_value(arguments.clone()).map_err(|e| RevaError::ToolExecutionError {
        tool: kind.name().to_string(),
        message: format!("invalid arguments: {e}"),
    })
}

fn shown_to_json(shown: &[ShownListing]) -> Vec<serde_json::Value> {
    shown
        .iter()
        .map(|s| {
            json!({
                "index": s.index,
                "listing_id": s.listing_id,
                "address": s.summary.address,
                "city": s.summary.city,
                "price": s.summary.price,
                "bedrooms": s.summary.bedrooms,
                "bathrooms": s.summary.bathrooms,
                "property_type": s.summary.property_type,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reva_context::MemoryContextStore;
    use reva_test_utils::MockListingService;

    fn executor() -> (ListingToolExecutor, Arc<MemoryContextStore>) {
        let store = Arc::new(MemoryContextStore::new());
        let data = Arc::new(MockListingService::with_fixtures());
        (
            ListingToolExecutor::new(data, store.clone()),
            store,
        )
    }

    fn call(name: &str, arguments: serde_json::Value) -> ToolCallRequest {
        ToolCallRequest {
            id: "call-1".into(),
            name: name.into(),
            arguments,
        }
    }

    fn conv() -> ConversationId {
        ConversationId("c-1".into())
    }

    #[tokio::test]
    async fn unknown_tool_is_a_typed_error() {
        let (exec, _) = executor();
        let err = exec
            .execute(&conv(), &call("frobnicate", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, RevaError::UnknownTool { .. }));
    }

    #[tokio::test]
    async fn search_updates_criteria_and_shown_list() {
        let (exec, store) = executor();
        let outcome = exec
            .execute(
                &conv(),
                &call("search_properties", json!({ "city": "Boston" })),
            )
            .await
            .unwrap();
        assert!(outcome.success);
        assert!(outcome.content["count"].as_u64().unwrap() > 0);

        let ctx = store.load(&conv()).await.unwrap();
        assert_eq!(ctx.value.search_criteria.city.as_deref(), Some("Boston"));
        assert!(!ctx.value.shown_listings.is_empty());
        assert_eq!(ctx.value.shown_listings[0].index, 1);
    }

    #[tokio::test]
    async fn second_search_merges_criteria() {
        let (exec, store) = executor();
        exec.execute(
            &conv(),
            &call(
                "search_properties",
                json!({ "city": "Boston", "max_price": 800000 }),
            ),
        )
        .await
        .unwrap();
        exec.execute(
            &conv(),
            &call("search_properties", json!({ "min_bedrooms": 2 })),
        )
        .await
        .unwrap();

        let ctx = store.load(&conv()).await.unwrap();
        assert_eq!(ctx.value.search_criteria.city.as_deref(), Some("Boston"));
        assert_eq!(ctx.value.search_criteria.max_price, Some(800_000));
        assert_eq!(ctx.value.search_criteria.min_bedrooms, Some(2));
    }

    #[tokio::test]
    async fn details_sets_the_active_listing() {
        let (exec, store) = executor();
        let outcome = exec
            .execute(
                &conv(),
                &call("get_property_details", json!({ "listing_id": "MLS12345" })),
            )
            .await
            .unwrap();
        assert!(outcome.success);

        let ctx = store.load(&conv()).await.unwrap();
        let active = ctx.value.active_listing.unwrap();
        assert_eq!(active.listing_id, "MLS12345");
    }

    #[tokio::test]
    async fn details_for_unknown_listing_is_a_tool_level_error() {
        let (exec, _) = executor();
        let outcome = exec
            .execute(
                &conv(),
                &call("get_property_details", json!({ "listing_id": "nope" })),
            )
            .await
            .unwrap();
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn reference_resolves_against_the_shown_list() {
        let (exec, store) = executor();
        exec.execute(
            &conv(),
            &call("search_properties", json!({ "city": "Boston" })),
        )
        .await
        .unwrap();

        let shown = store.load(&conv()).await.unwrap().value.shown_listings;
        let outcome = exec
            .execute(
                &conv(),
                &call("resolve_property_reference", json!({ "reference": "2" })),
            )
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.content["id"], shown[1].listing_id.as_str());
    }

    #[tokio::test]
    async fn unresolvable_reference_is_typed() {
        let (exec, _) = executor();
        let err = exec
            .execute(
                &conv(),
                &call(
                    "resolve_property_reference",
                    json!({ "reference": "the purple one" }),
                ),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RevaError::ReferenceUnresolved { .. }));
    }

    #[tokio::test]
    async fn category_requires_an_active_listing() {
        let (exec, _) = executor();
        let outcome = exec
            .execute(
                &conv(),
                &call("get_property_category", json!({ "category": "financial" })),
            )
            .await
            .unwrap();
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn category_projects_only_its_fields() {
        let (exec, _) = executor();
        exec.execute(
            &conv(),
            &call("get_property_details", json!({ "listing_id": "MLS12345" })),
        )
        .await
        .unwrap();

        let outcome = exec
            .execute(
                &conv(),
                &call("get_property_category", json!({ "category": "financial" })),
            )
            .await
            .unwrap();
        assert!(outcome.success);
        let fields = &outcome.content["fields"];
        assert!(fields.get("annual_taxes").is_some());
        assert!(fields.get("bedrooms").is_none());
    }

    #[tokio::test]
    async fn tour_records_contact_info_write_once() {
        let (exec, store) = executor();
        exec.execute(
            &conv(),
            &call(
                "schedule_tour",
                json!({
                    "listing_id": "MLS12345",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "phone": "555-0100"
                }),
            ),
        )
        .await
        .unwrap();
        exec.execute(
            &conv(),
            &call(
                "contact_agent",
                json!({
                    "name": "Someone Else",
                    "email": "other@example.com",
                    "message": "hello"
                }),
            ),
        )
        .await
        .unwrap();

        let info = store.load(&conv()).await.unwrap().value.collected_info;
        assert_eq!(info.name.as_deref(), Some("Ada"));
        assert_eq!(info.email.as_deref(), Some("ada@example.com"));
        assert_eq!(info.phone.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn concurrent_mutating_calls_both_land() {
        let (exec, store) = executor();
        let search = call("search_properties", json!({ "city": "Boston" }));
        let tour = ToolCallRequest {
            id: "call-2".into(),
            name: "schedule_tour".into(),
            arguments: json!({
                "listing_id": "MLS12345",
                "name": "Ada",
                "email": "ada@example.com",
                "phone": "555-0100"
            }),
        };

        let conv_a = conv();
        let conv_b = conv();
        let (a, b) = tokio::join!(exec.execute(&conv_a, &search), exec.execute(&conv_b, &tour));
        assert!(a.unwrap().success);
        assert!(b.unwrap().success);

        let ctx = store.load(&conv()).await.unwrap().value;
        assert!(!ctx.shown_listings.is_empty());
        assert_eq!(ctx.collected_info.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn bad_arguments_are_a_tool_execution_error() {
        let (exec, _) = executor();
        let err = exec
            .execute(&conv(), &call("get_property_details", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, RevaError::ToolExecutionError { .. }));
    }
}
