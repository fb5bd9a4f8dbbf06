// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Reva assistant core.

use thiserror::Error;

/// The primary error type used across all Reva crates.
///
/// Provider-level variants (`MissingCredential`, `RateLimitExceeded`,
/// `ProviderRequestFailed`, `ProviderApiError`, `InvalidResponseFormat`)
/// trigger router fallback to the next chain entry and are never surfaced
/// raw to the end user while alternatives remain.
#[derive(Debug, Error)]
pub enum RevaError {
    /// Configuration errors (invalid TOML, missing required fields, bad preference entries).
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider has no API key configured or available in the environment.
    #[error("missing credential for provider {provider}")]
    MissingCredential { provider: String },

    /// The local per-provider daily request limit was exceeded.
    #[error("rate limit exceeded for provider {provider}: {limit} requests/day")]
    RateLimitExceeded { provider: String, limit: u32 },

    /// Transport-level failure talking to a provider (connection, timeout).
    #[error("provider request failed for {provider}: {message}")]
    ProviderRequestFailed { provider: String, message: String },

    /// The provider rejected the call with an API-level error.
    #[error("provider {provider} returned API error {status}: {message}")]
    ProviderApiError {
        provider: String,
        status: u16,
        message: String,
    },

    /// The provider returned a payload that could not be parsed.
    #[error("invalid response format from {provider}: {message}")]
    InvalidResponseFormat { provider: String, message: String },

    /// The tool-calling loop hit its iteration bound without a final answer.
    #[error("tool loop reached maximum of {iterations} iterations without a final answer")]
    MaxIterationsReached { iterations: u32 },

    /// A tool name was requested that is not in the closed tool set.
    #[error("unknown tool: {name}")]
    UnknownTool { name: String },

    /// A tool executed but failed; fed back to the model, not loop-fatal.
    #[error("tool {tool} failed: {message}")]
    ToolExecutionError { tool: String, message: String },

    /// The provider chain for a query type was empty from the start.
    #[error("no providers configured")]
    NoProvidersConfigured,

    /// Every entry in the provider chain was attempted and failed.
    #[error("all {attempts} providers in the chain failed")]
    AllProvidersFailed { attempts: usize },

    /// A listing reference could not be resolved against the shown list.
    #[error("could not resolve reference: {reference}")]
    ReferenceUnresolved { reference: String },

    /// Optimistic save rejected because the stored context moved on.
    #[error("conversation context for {conversation} was modified concurrently")]
    ContextVersionConflict { conversation: String },

    /// Domain data service errors (query failure, backend unavailable).
    #[error("data service error: {0}")]
    DataService(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RevaError {
    /// Whether this error is scoped to a single provider and should trigger
    /// fallback to the next chain entry rather than aborting the turn.
    pub fn is_provider_scoped(&self) -> bool {
        matches!(
            self,
            RevaError::MissingCredential { .. }
                | RevaError::RateLimitExceeded { .. }
                | RevaError::ProviderRequestFailed { .. }
                | RevaError::ProviderApiError { .. }
                | RevaError::InvalidResponseFormat { .. }
        )
    }
}
