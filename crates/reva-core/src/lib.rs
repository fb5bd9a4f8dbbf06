// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Reva real-estate assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Reva workspace: the provider adapter
//! seam, the tool executor seam, the opaque listing data service, and the
//! transcript/result shapes shared by the router, tool loop, and cascade.

pub mod error;
pub mod traits;
pub mod types;

pub use error::RevaError;
pub use types::{
    AgentInquiry, ChatMessage, ChatRequest, ChatRole, ConversationId, FinishReason,
    InquiryConfirmation, Listing, ListingSummary, MarketStat, NeighborhoodInfo, PriceTrendPoint,
    PropertyCategory, ProviderReply, ProviderResult, QueryKind, RoutingInfo, SearchCriteria,
    TokenUsage, ToolCallRecord, ToolCallRequest, ToolDefinition, ToolOutcome, TourConfirmation,
    TourRequest,
};

pub use traits::{ListingDataService, ProviderAdapter, ToolExecutor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_cover_the_taxonomy() {
        let variants: Vec<RevaError> = vec![
            RevaError::Config("bad".into()),
            RevaError::MissingCredential {
                provider: "openai".into(),
            },
            RevaError::RateLimitExceeded {
                provider: "openai".into(),
                limit: 100,
            },
            RevaError::ProviderRequestFailed {
                provider: "openai".into(),
                message: "timeout".into(),
            },
            RevaError::ProviderApiError {
                provider: "openai".into(),
                status: 500,
                message: "server error".into(),
            },
            RevaError::InvalidResponseFormat {
                provider: "openai".into(),
                message: "truncated json".into(),
            },
            RevaError::MaxIterationsReached { iterations: 5 },
            RevaError::UnknownTool {
                name: "frobnicate".into(),
            },
            RevaError::ToolExecutionError {
                tool: "search_properties".into(),
                message: "backend down".into(),
            },
            RevaError::NoProvidersConfigured,
            RevaError::AllProvidersFailed { attempts: 2 },
            RevaError::ReferenceUnresolved {
                reference: "the teal one".into(),
            },
            RevaError::ContextVersionConflict {
                conversation: "c-1".into(),
            },
            RevaError::DataService("query failed".into()),
            RevaError::Internal("unexpected".into()),
        ];
        for v in &variants {
            assert!(!v.to_string().is_empty());
        }
    }
}
