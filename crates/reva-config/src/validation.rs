// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic validation of a loaded configuration.
//!
//! Figment and serde catch structural errors; this pass catches settings
//! that parse fine but cannot work, with actionable messages.

use crate::model::RevaConfig;

/// One problem found in an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending setting.
    pub path: String,
    /// What is wrong and how to fix it.
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a loaded configuration, returning every issue found.
pub fn validate(config: &RevaConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.routing.chat_timeout_secs == 0 {
        issues.push(ValidationIssue {
            path: "routing.chat_timeout_secs".into(),
            message: "must be greater than zero".into(),
        });
    }
    if config.routing.tool_timeout_secs == 0 {
        issues.push(ValidationIssue {
            path: "routing.tool_timeout_secs".into(),
            message: "must be greater than zero".into(),
        });
    }
    if config.routing.max_tokens == 0 {
        issues.push(ValidationIssue {
            path: "routing.max_tokens".into(),
            message: "must be greater than zero".into(),
        });
    }

    // Confidence bands must be ordered low < medium < high within [0, 1].
    let c = &config.cascade;
    for (path, value) in [
        ("cascade.high_confidence", c.high_confidence),
        ("cascade.medium_confidence", c.medium_confidence),
        ("cascade.low_confidence", c.low_confidence),
    ] {
        if !(0.0..=1.0).contains(&value) {
            issues.push(ValidationIssue {
                path: path.into(),
                message: format!("must be within [0, 1], got {value}"),
            });
        }
    }
    if !(c.low_confidence < c.medium_confidence && c.medium_confidence < c.high_confidence) {
        issues.push(ValidationIssue {
            path: "cascade".into(),
            message: "confidence bands must satisfy low < medium < high".into(),
        });
    }

    // Every preference entry must be "provider" or "provider:model" and
    // name a configured provider.
    for entry in config.routing.preferences.all_entries() {
        let provider = entry.split(':').next().unwrap_or_default();
        if provider.is_empty() {
            issues.push(ValidationIssue {
                path: "routing.preferences".into(),
                message: format!("malformed entry {entry:?}; expected \"provider:model\""),
            });
        } else if !config.providers.contains_key(provider) {
            issues.push(ValidationIssue {
                path: "routing.preferences".into(),
                message: format!(
                    "entry {entry:?} names unconfigured provider {provider:?}; \
                     add a [providers.{provider}] section"
                ),
            });
        }
    }

    for (name, provider) in &config.providers {
        if provider.daily_request_limit == Some(0) {
            issues.push(ValidationIssue {
                path: format!("providers.{name}.daily_request_limit"),
                message: "a limit of 0 disables the provider; omit to allow unlimited".into(),
            });
        }
    }

    issues
}
