// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool inventory and execution for the Reva assistant.
//!
//! `ToolKind` is the closed set of tools described to providers;
//! `ListingToolExecutor` dispatches requested calls against the listing
//! data service and conversation context.

pub mod defs;
pub mod executor;

pub use defs::{ToolKind, all_definitions};
pub use executor::ListingToolExecutor;
