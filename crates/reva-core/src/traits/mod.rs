// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented at the seams of the Reva core.
//!
//! Components are explicitly constructed and injected; there are no global
//! registries, so tests substitute fakes without global mutation.

pub mod listings;
pub mod provider;
pub mod tools;

pub use listings::ListingDataService;
pub use provider::ProviderAdapter;
pub use tools::ToolExecutor;
