// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for the Reva assistant.
//!
//! Config is merged from compiled defaults, TOML files in the XDG
//! hierarchy, and `REVA_*` environment variables, then semantically
//! validated.

pub mod loader;
pub mod logging;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use logging::init_logging;
pub use model::{
    AgentConfig, CacheConfig, CascadeConfig, ProviderConfig, RevaConfig, RoutingConfig,
    RoutingPreferences,
};
pub use validation::{ValidationIssue, validate};
