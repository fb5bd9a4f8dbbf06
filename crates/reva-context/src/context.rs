// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation mutable state: collected contact info, active search
//! criteria, the shown-listing list, and the listing under discussion.

use chrono::{DateTime, Utc};
use reva_core::types::{Listing, ListingSummary, SearchCriteria};
use serde::{Deserialize, Serialize};

use crate::reference;

/// Contact fields collected over the conversation.
///
/// Each field is write-once: the first non-empty value sticks and later
/// values are ignored, so a name given in turn 2 survives turn 20.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectedInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
}

impl CollectedInfo {
    fn set_once(slot: &mut Option<String>, value: Option<&str>) {
        if slot.is_none()
            && let Some(v) = value
            && !v.trim().is_empty()
        {
            *slot = Some(v.trim().to_string());
        }
    }

    /// Record any newly supplied fields, never overwriting existing ones.
    pub fn record(
        &mut self,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        preferences: Option<&str>,
    ) {
        Self::set_once(&mut self.name, name);
        Self::set_once(&mut self.email, email);
        Self::set_once(&mut self.phone, phone);
        Self::set_once(&mut self.preferences, preferences);
    }
}

/// One entry in the shown-listing list, with its 1-based display index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShownListing {
    pub index: u32,
    pub listing_id: String,
    pub summary: ListingSummary,
}

/// The listing currently under discussion, with a full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveListing {
    pub listing_id: String,
    pub snapshot: Listing,
}

/// Mutable per-conversation state, one record per conversation.
///
/// Mutations are durable only after the owning store's `save` completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    #[serde(default)]
    pub collected_info: CollectedInfo,
    #[serde(default)]
    pub search_criteria: SearchCriteria,
    #[serde(default)]
    pub shown_listings: Vec<ShownListing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_listing: Option<ActiveListing>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ConversationContext {
    /// Merge-update the stored search criteria: supplied non-empty values
    /// replace per field, omitted fields are retained.
    pub fn update_search_criteria(&mut self, new: &SearchCriteria) {
        self.search_criteria.merge_from(new);
        self.touch();
    }

    /// Replace the entire shown list with fresh results, assigning
    /// contiguous 1-based indices in the order given.
    pub fn record_shown_listings(&mut self, results: Vec<ListingSummary>) {
        self.shown_listings = results
            .into_iter()
            .enumerate()
            .map(|(i, summary)| ShownListing {
                index: (i + 1) as u32,
                listing_id: summary.id.clone(),
                summary,
            })
            .collect();
        self.touch();
    }

    /// Replace the active listing unconditionally.
    pub fn set_active_listing(&mut self, snapshot: Listing) {
        self.active_listing = Some(ActiveListing {
            listing_id: snapshot.id.clone(),
            snapshot,
        });
        self.touch();
    }

    /// Resolve a user reference ("2", "#3", "the first one", partial
    /// address) against the shown list.
    pub fn resolve_reference(&self, text: &str) -> Option<&ShownListing> {
        reference::resolve(text, &self.shown_listings)
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
