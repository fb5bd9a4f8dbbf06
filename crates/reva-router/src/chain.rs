// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry and per-query-type chain building.

use std::collections::HashMap;
use std::sync::Arc;

use reva_config::RevaConfig;
use reva_core::{ProviderAdapter, QueryKind};

/// One entry in a built provider chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub provider: String,
    pub model: String,
    pub cost_rank: u32,
}

/// Registered provider adapters, keyed by provider name.
#[derive(Default)]
pub struct ProviderRegistry {
    adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own reported name.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.name().to_string(), adapter);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

/// Build the ordered provider chain for one query type.
///
/// Preference entries are `provider` or `provider:model`; entries whose
/// provider is not configured, not registered, or lacks credentials are
/// dropped. With cost optimization on, kept entries are stably sorted by
/// ascending cost rank, so ties preserve declared preference order. Any
/// configured-but-unlisted providers are appended afterwards with their
/// default model, as last-resort fallback.
pub fn build_chain(
    kind: QueryKind,
    config: &RevaConfig,
    registry: &ProviderRegistry,
) -> Vec<ProviderSpec> {
    let usable = |name: &str| {
        config.providers.contains_key(name)
            && registry.get(name).is_some_and(|a| a.has_credentials())
    };

    let mut chain: Vec<ProviderSpec> = config
        .routing
        .preferences
        .for_kind(kind)
        .iter()
        .filter_map(|entry| {
            let (provider, model) = match entry.split_once(':') {
                Some((p, m)) => (p, Some(m)),
                None => (entry.as_str(), None),
            };
            if provider.is_empty() || !usable(provider) {
                return None;
            }
            let settings = &config.providers[provider];
            Some(ProviderSpec {
                provider: provider.to_string(),
                model: model.unwrap_or(&settings.default_model).to_string(),
                cost_rank: settings.cost_rank,
            })
        })
        .collect();

    if config.routing.cost_optimization {
        chain.sort_by_key(|spec| spec.cost_rank);
    }

    let mut last_resort: Vec<ProviderSpec> = config
        .providers
        .iter()
        .filter(|(name, _)| !chain.iter().any(|spec| spec.provider == **name))
        .filter(|(name, _)| usable(name))
        .map(|(name, settings)| ProviderSpec {
            provider: name.clone(),
            model: settings.default_model.clone(),
            cost_rank: settings.cost_rank,
        })
        .collect();
    last_resort.sort_by_key(|spec| spec.cost_rank);
    chain.extend(last_resort);

    chain
}
