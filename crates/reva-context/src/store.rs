// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context persistence with optimistic concurrency.
//!
//! Rapid turns on the same conversation race on the load-mutate-save cycle;
//! the version check makes the conflict explicit instead of silently losing
//! an update. Callers that hit `ContextVersionConflict` reload and reapply.

use async_trait::async_trait;
use dashmap::DashMap;
use reva_core::{ConversationId, RevaError};
use tracing::debug;

use crate::context::ConversationContext;

/// A context value paired with the store version it was loaded at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

/// Load/save access to per-conversation context records.
///
/// `save` must reject a write whose version is older than the stored one,
/// so concurrent turns on one conversation cannot lose updates.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Load the context for a conversation, or a fresh default at version 0.
    async fn load(
        &self,
        id: &ConversationId,
    ) -> Result<Versioned<ConversationContext>, RevaError>;

    /// Persist a context loaded at `versioned.version`. Returns the new
    /// version on success; fails with `ContextVersionConflict` if the
    /// stored record has moved on.
    async fn save(
        &self,
        id: &ConversationId,
        versioned: Versioned<ConversationContext>,
    ) -> Result<u64, RevaError>;
}

/// In-memory context store backed by a concurrent map.
///
/// The external record-store layout (collected_info, search_criteria,
/// shown list, active listing id + snapshot, last-updated) is exactly the
/// serialized `ConversationContext`.
#[derive(Default)]
pub struct MemoryContextStore {
    records: DashMap<String, (u64, ConversationContext)>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContextStore for MemoryContextStore {
    async fn load(
        &self,
        id: &ConversationId,
    ) -> Result<Versioned<ConversationContext>, RevaError> {
        match self.records.get(id.as_str()) {
            Some(entry) => {
                let (version, ctx) = entry.value();
                Ok(Versioned {
                    value: ctx.clone(),
                    version: *version,
                })
            }
            None => Ok(Versioned {
                value: ConversationContext::default(),
                version: 0,
            }),
        }
    }

    async fn save(
        &self,
        id: &ConversationId,
        versioned: Versioned<ConversationContext>,
    ) -> Result<u64, RevaError> {
        let mut entry = self
            .records
            .entry(id.as_str().to_string())
            .or_insert_with(|| (0, ConversationContext::default()));
        let (stored_version, stored) = entry.value_mut();

        if *stored_version != versioned.version {
            return Err(RevaError::ContextVersionConflict {
                conversation: id.as_str().to_string(),
            });
        }

        *stored_version += 1;
        *stored = versioned.value;
        debug!(
            conversation = id.as_str(),
            version = *stored_version,
            "conversation context saved"
        );
        Ok(*stored_version)
    }
}
