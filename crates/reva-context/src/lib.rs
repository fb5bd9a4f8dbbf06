// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation-scoped state for the Reva assistant.
//!
//! Holds the per-conversation record (collected contact info, search
//! criteria, shown listings, active listing), its merge semantics, the
//! reference resolver that makes "the second one" work across turns, and
//! a versioned store that serializes concurrent writes per conversation.

pub mod context;
pub mod reference;
pub mod store;

pub use context::{ActiveListing, CollectedInfo, ConversationContext, ShownListing};
pub use store::{ContextStore, MemoryContextStore, Versioned};
