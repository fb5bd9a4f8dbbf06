// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup from the agent configuration.

use tracing_subscriber::EnvFilter;

use crate::model::AgentConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured `agent.log_level`
/// applies to the `reva` crates with everything else at `warn`. Calling
/// this more than once is a no-op, so embedding applications and tests can
/// both call it safely.
pub fn init_logging(agent: &AgentConfig) {
    let directives = format!(
        "warn,reva_core={0},reva_config={0},reva_context={0},reva_router={0},reva_tools={0},reva_cascade={0}",
        agent.log_level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_does_not_panic() {
        let agent = AgentConfig::default();
        init_logging(&agent);
        init_logging(&agent);
    }
}
