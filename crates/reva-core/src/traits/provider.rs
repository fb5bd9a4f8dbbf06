// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM vendor integrations.

use async_trait::async_trait;

use crate::error::RevaError;
use crate::types::{ChatRequest, ProviderReply};

/// Uniform contract to one LLM vendor.
///
/// An adapter sends a chat request (with or without tool definitions) and
/// returns text, token usage, and any requested tool calls. The HTTP
/// transport behind `chat` is the adapter's concern; the router only sees
/// this surface.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable provider name used in config keys and routing metadata.
    fn name(&self) -> &str;

    /// Whether this vendor supports function calling.
    fn supports_tools(&self) -> bool;

    /// Whether the adapter has valid credentials available.
    ///
    /// Checked before any network call; a `false` here marks the provider
    /// unavailable for chain building and iteration.
    fn has_credentials(&self) -> bool;

    /// Send one chat round trip.
    async fn chat(&self, request: ChatRequest) -> Result<ProviderReply, RevaError>;
}
