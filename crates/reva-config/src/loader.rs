// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./reva.toml` > `~/.config/reva/reva.toml` >
//! `/etc/reva/reva.toml` with environment variable overrides via the
//! `REVA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is large and external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RevaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/reva/reva.toml` (system-wide)
/// 3. `~/.config/reva/reva.toml` (user XDG config)
/// 4. `./reva.toml` (local directory)
/// 5. `REVA_*` environment variables
pub fn load_config() -> Result<RevaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RevaConfig::default()))
        .merge(Toml::file("/etc/reva/reva.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("reva/reva.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("reva.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<RevaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RevaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RevaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RevaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `REVA_ROUTING_FALLBACK_ENABLED` must
/// map to `routing.fallback_enabled`, not `routing.fallback.enabled`.
fn env_provider() -> Env {
    Env::prefixed("REVA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("cache_", "cache.", 1)
            .replacen("cascade_", "cascade.", 1);
        mapped.into()
    })
}
