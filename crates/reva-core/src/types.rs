// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Reva workspace: chat transcripts, provider
//! request/reply shapes, tool-call records, and the listing data model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Query classification computed per message; never persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Simple,
    PropertySearch,
    MarketAnalysis,
    General,
}

impl QueryKind {
    /// Whether this kind of query benefits from tool access.
    pub fn wants_tools(self) -> bool {
        matches!(self, QueryKind::PropertySearch | QueryKind::MarketAnalysis)
    }
}

/// Role of a transcript message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

/// One message in a provider transcript.
///
/// Assistant messages may carry requested tool calls; tool messages carry a
/// result tagged to the call that produced it via `tool_call_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant turn that requests tool calls.
    pub fn assistant_tool_calls(content: impl Into<String>, calls: Vec<ToolCallRequest>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            tool_calls: calls,
            tool_call_id: None,
        }
    }

    /// A tool-result message tagged to the call that produced it.
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }
}

/// Token usage reported by a provider call.
///
/// The tool loop accumulates these across iterations; totals never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }

    /// Accumulate another call's usage into this running total.
    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// The outcome of executing one tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub success: bool,
    pub content: serde_json::Value,
}

impl ToolOutcome {
    pub fn ok(content: serde_json::Value) -> Self {
        Self {
            success: true,
            content,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: serde_json::json!({ "error": message.into() }),
        }
    }
}

/// Neutral tool declaration handed to provider adapters.
///
/// `parameters` is a JSON-schema-shaped object; each adapter translates it
/// to its vendor's function-calling wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Why a provider turn ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    ToolCalls,
    Length,
    Other(String),
}

/// A chat request handed to a provider adapter.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDefinition>,
    pub max_tokens: u32,
}

/// A single reply from a provider adapter.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub text: String,
    pub tool_calls: Vec<ToolCallRequest>,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
    pub model: String,
}

impl ProviderReply {
    /// Whether this reply is a final answer (no further tool calls requested).
    pub fn is_final(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// Record of one tool call made during a loop run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub name: String,
    pub arguments: serde_json::Value,
    pub success: bool,
}

/// Routing metadata attached by the model router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingInfo {
    pub query_type: QueryKind,
    pub provider_used: String,
    pub model_used: String,
    pub tools_enabled: bool,
    pub fallback_used: bool,
}

/// Contract returned by every successful chat or tool-loop call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResult {
    pub success: bool,
    pub text: String,
    pub role: ChatRole,
    pub finish_reason: FinishReason,
    pub tokens: TokenUsage,
    pub model: String,
    pub provider: String,
    pub response_time_ms: u64,
    pub tool_calls_made: Vec<ToolCallRecord>,
    pub tool_iterations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingInfo>,
}

// --- Listing data model ---

/// Search filters; fields are merged per-field across turns (a supplied
/// non-empty value replaces, an omitted field retains the stored value).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bathrooms: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl SearchCriteria {
    /// Merge-update: supplied non-empty values replace stored values,
    /// omitted fields retain what was there.
    pub fn merge_from(&mut self, new: &SearchCriteria) {
        fn replace_str(slot: &mut Option<String>, new: &Option<String>) {
            if let Some(v) = new
                && !v.trim().is_empty()
            {
                *slot = Some(v.clone());
            }
        }
        replace_str(&mut self.city, &new.city);
        replace_str(&mut self.neighborhood, &new.neighborhood);
        replace_str(&mut self.property_type, &new.property_type);
        replace_str(&mut self.keywords, &new.keywords);
        if new.min_price.is_some() {
            self.min_price = new.min_price;
        }
        if new.max_price.is_some() {
            self.max_price = new.max_price;
        }
        if new.min_bedrooms.is_some() {
            self.min_bedrooms = new.min_bedrooms;
        }
        if new.min_bathrooms.is_some() {
            self.min_bathrooms = new.min_bathrooms;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.neighborhood.is_none()
            && self.property_type.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_bedrooms.is_none()
            && self.min_bathrooms.is_none()
            && self.keywords.is_none()
    }
}

/// Summary fields of a listing as shown in a result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: String,
    pub address: String,
    pub city: String,
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub property_type: String,
}

/// Full listing record returned by a details lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub address: String,
    pub city: String,
    pub neighborhood: String,
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub property_type: String,
    pub square_feet: u32,
    pub year_built: u32,
    pub annual_taxes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa_fee: Option<u64>,
    pub school_district: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub status: String,
}

impl Listing {
    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            id: self.id.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            property_type: self.property_type.clone(),
        }
    }
}

/// Category views over the active listing, for `get_property_category`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Basic,
    Financial,
    Location,
    Features,
    Schools,
}

/// A single market statistic value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStat {
    pub stat_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    pub value: f64,
    pub unit: String,
    pub sample_size: u32,
}

/// Aggregate stats for one neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodInfo {
    pub name: String,
    pub city: String,
    pub median_price: u64,
    pub active_listings: u32,
    pub school_rating: f32,
    pub walk_score: u32,
}

/// One month in a price-trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTrendPoint {
    pub month: String,
    pub median_price: u64,
    pub sales_count: u32,
}

/// A tour scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourRequest {
    pub listing_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Confirmation returned after scheduling a tour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourConfirmation {
    pub confirmation_id: String,
    pub listing_id: String,
    pub scheduled_for: Option<String>,
}

/// A contact-the-agent inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInquiry {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_type: Option<String>,
}

/// Confirmation returned after recording an inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryConfirmation {
    pub confirmation_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_kind_round_trips_through_strings() {
        use std::str::FromStr;
        for kind in [
            QueryKind::Simple,
            QueryKind::PropertySearch,
            QueryKind::MarketAnalysis,
            QueryKind::General,
        ] {
            let s = kind.to_string();
            assert_eq!(QueryKind::from_str(&s).unwrap(), kind);
        }
        assert_eq!(QueryKind::PropertySearch.to_string(), "property_search");
    }

    #[test]
    fn only_search_and_market_queries_want_tools() {
        assert!(QueryKind::PropertySearch.wants_tools());
        assert!(QueryKind::MarketAnalysis.wants_tools());
        assert!(!QueryKind::Simple.wants_tools());
        assert!(!QueryKind::General.wants_tools());
    }

    #[test]
    fn token_usage_accumulates() {
        let mut total = TokenUsage::new(100, 50);
        total.accumulate(&TokenUsage::new(40, 10));
        assert_eq!(total.prompt_tokens, 140);
        assert_eq!(total.completion_tokens, 60);
        assert_eq!(total.total(), 200);
    }

    #[test]
    fn criteria_merge_replaces_supplied_and_retains_omitted() {
        let mut stored = SearchCriteria {
            city: Some("Boston".into()),
            max_price: Some(500_000),
            ..Default::default()
        };
        let update = SearchCriteria {
            min_bedrooms: Some(2),
            ..Default::default()
        };
        stored.merge_from(&update);
        assert_eq!(stored.city.as_deref(), Some("Boston"));
        assert_eq!(stored.max_price, Some(500_000));
        assert_eq!(stored.min_bedrooms, Some(2));
    }

    #[test]
    fn criteria_merge_ignores_empty_strings() {
        let mut stored = SearchCriteria {
            city: Some("Boston".into()),
            ..Default::default()
        };
        let update = SearchCriteria {
            city: Some("  ".into()),
            ..Default::default()
        };
        stored.merge_from(&update);
        assert_eq!(stored.city.as_deref(), Some("Boston"));
    }

    #[test]
    fn tool_outcome_error_carries_message() {
        let outcome = ToolOutcome::error("no such listing");
        assert!(!outcome.success);
        assert_eq!(outcome.content["error"], "no such listing");
    }

    #[test]
    fn provider_reply_is_final_without_tool_calls() {
        let reply = ProviderReply {
            text: "done".into(),
            tool_calls: vec![],
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
            model: "m".into(),
        };
        assert!(reply.is_final());
    }

    #[test]
    fn tool_result_message_is_tagged_to_its_call() {
        let msg = ChatMessage::tool_result("call-7", "{\"count\":3}");
        assert_eq!(msg.role, ChatRole::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call-7"));
    }
}
