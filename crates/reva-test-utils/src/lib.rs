// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles shared across the workspace: a scripted provider adapter
//! and a fixture-backed listing data service.

pub mod mock_listings;
pub mod mock_provider;

pub use mock_listings::MockListingService;
pub use mock_provider::{MockProvider, ScriptedReply};
