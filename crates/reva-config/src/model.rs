// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Reva assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use reva_core::QueryKind;
use serde::{Deserialize, Serialize};

/// Top-level Reva configuration.
///
/// Loaded from TOML files with environment variable overrides. All sections
/// are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RevaConfig {
    /// Assistant identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Per-provider settings, keyed by provider name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,

    /// Model routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Cascade confidence thresholds.
    #[serde(default)]
    pub cascade: CascadeConfig,
}

/// Assistant identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system prompt prepended to every router call.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
        }
    }
}

fn default_agent_name() -> String {
    "reva".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for one LLM provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key. `None` defers to the adapter's own credential resolution.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used when a preference entry names only the provider, and for
    /// last-resort fallback appends.
    #[serde(default = "default_provider_model")]
    pub default_model: String,

    /// Relative cost rank; lower is cheaper. Used only for ordering among
    /// equally-preferred providers when cost optimization is on.
    #[serde(default = "default_cost_rank")]
    pub cost_rank: u32,

    /// Local daily request cap. `None` = unlimited.
    #[serde(default)]
    pub daily_request_limit: Option<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_provider_model(),
            cost_rank: default_cost_rank(),
            daily_request_limit: None,
        }
    }
}

fn default_provider_model() -> String {
    "default".to_string()
}

fn default_cost_rank() -> u32 {
    100
}

/// Model routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Sort equally-preferred providers by ascending cost rank.
    #[serde(default = "default_true")]
    pub cost_optimization: bool,

    /// Continue down the chain after a provider failure.
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,

    /// Timeout for plain chat calls.
    #[serde(default = "default_chat_timeout_secs")]
    pub chat_timeout_secs: u64,

    /// Timeout for tool-enabled calls; covers the whole loop since it may
    /// span multiple round trips.
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,

    /// Max tokens requested per provider response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Preferred `provider:model` chains per query type.
    #[serde(default)]
    pub preferences: RoutingPreferences,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            cost_optimization: default_true(),
            fallback_enabled: default_true(),
            chat_timeout_secs: default_chat_timeout_secs(),
            tool_timeout_secs: default_tool_timeout_secs(),
            max_tokens: default_max_tokens(),
            preferences: RoutingPreferences::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_chat_timeout_secs() -> u64 {
    30
}

fn default_tool_timeout_secs() -> u64 {
    120
}

fn default_max_tokens() -> u32 {
    1024
}

/// Ordered `provider:model` preference lists per query type.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingPreferences {
    #[serde(default)]
    pub simple: Vec<String>,
    #[serde(default)]
    pub property_search: Vec<String>,
    #[serde(default)]
    pub market_analysis: Vec<String>,
    #[serde(default)]
    pub general: Vec<String>,
}

impl RoutingPreferences {
    /// The declared preference list for one query type.
    pub fn for_kind(&self, kind: QueryKind) -> &[String] {
        match kind {
            QueryKind::Simple => &self.simple,
            QueryKind::PropertySearch => &self.property_search,
            QueryKind::MarketAnalysis => &self.market_analysis,
            QueryKind::General => &self.general,
        }
    }

    /// All preference entries across query types, for validation.
    pub fn all_entries(&self) -> impl Iterator<Item = &String> {
        self.simple
            .iter()
            .chain(self.property_search.iter())
            .chain(self.market_analysis.iter())
            .chain(self.general.iter())
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// TTL for AI-generated answers.
    #[serde(default = "default_ai_ttl_secs")]
    pub ai_ttl_secs: u64,

    /// TTL for deterministic data answers.
    #[serde(default = "default_data_ttl_secs")]
    pub data_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ai_ttl_secs: default_ai_ttl_secs(),
            data_ttl_secs: default_data_ttl_secs(),
        }
    }
}

fn default_ai_ttl_secs() -> u64 {
    3_600
}

fn default_data_ttl_secs() -> u64 {
    86_400
}

/// Cascade confidence bands.
///
/// The bands gate stage acceptance; the FAQ scoring weights themselves live
/// with the FAQ index as tunable data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CascadeConfig {
    #[serde(default = "default_high_confidence")]
    pub high_confidence: f64,

    #[serde(default = "default_medium_confidence")]
    pub medium_confidence: f64,

    #[serde(default = "default_low_confidence")]
    pub low_confidence: f64,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            high_confidence: default_high_confidence(),
            medium_confidence: default_medium_confidence(),
            low_confidence: default_low_confidence(),
        }
    }
}

fn default_high_confidence() -> f64 {
    0.85
}

fn default_medium_confidence() -> f64 {
    0.65
}

fn default_low_confidence() -> f64 {
    0.40
}
