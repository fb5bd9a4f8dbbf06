// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model routing for the Reva assistant: query classification, cost-ranked
//! provider chains, local rate limits, the bounded tool-calling loop, and
//! the router that ties them together with automatic fallback.

pub mod chain;
pub mod classifier;
pub mod limits;
pub mod router;
pub mod tool_loop;

pub use chain::{ProviderRegistry, ProviderSpec, build_chain};
pub use classifier::QueryClassifier;
pub use limits::DailyRateLimiter;
pub use router::ModelRouter;
pub use tool_loop::{LoopOutcome, MAX_ITERATIONS, run_tool_loop};
