// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque domain data service for listings, market stats, and inquiries.

use async_trait::async_trait;

use crate::error::RevaError;
use crate::types::{
    AgentInquiry, InquiryConfirmation, Listing, ListingSummary, MarketStat, NeighborhoodInfo,
    PriceTrendPoint, SearchCriteria, TourConfirmation, TourRequest,
};

/// Structured data backend. Query construction and storage live behind this
/// trait; the cascade's data stage and the tool executor only consume it.
#[async_trait]
pub trait ListingDataService: Send + Sync {
    /// Search active listings by criteria.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<ListingSummary>, RevaError>;

    /// Full record for one listing, `None` if unknown.
    async fn listing_details(&self, listing_id: &str) -> Result<Option<Listing>, RevaError>;

    /// A single market statistic, optionally scoped by city and type.
    async fn market_stats(
        &self,
        stat_type: &str,
        city: Option<&str>,
        property_type: Option<&str>,
    ) -> Result<MarketStat, RevaError>;

    /// Aggregate stats for one neighborhood, `None` if unknown.
    async fn neighborhood_info(
        &self,
        neighborhood: &str,
    ) -> Result<Option<NeighborhoodInfo>, RevaError>;

    /// Monthly price series, most recent month last.
    async fn price_trends(
        &self,
        city: Option<&str>,
        property_type: Option<&str>,
        months: u32,
    ) -> Result<Vec<PriceTrendPoint>, RevaError>;

    /// Comparable listings for the given listing.
    async fn similar_listings(
        &self,
        listing_id: &str,
        count: usize,
    ) -> Result<Vec<ListingSummary>, RevaError>;

    /// Free-text search over listing descriptions and addresses.
    async fn text_search(&self, query: &str) -> Result<Vec<ListingSummary>, RevaError>;

    /// Record a tour request.
    async fn schedule_tour(&self, request: &TourRequest) -> Result<TourConfirmation, RevaError>;

    /// Record a contact-the-agent inquiry.
    async fn contact_agent(
        &self,
        inquiry: &AgentInquiry,
    ) -> Result<InquiryConfirmation, RevaError>;
}
