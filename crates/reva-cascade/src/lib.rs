// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response resolution cascade for the Reva assistant: FAQ matching, a
//! hash-keyed response cache, structured-data answers, canned templates,
//! and the hand-off to the model router.

pub mod cache;
pub mod cascade;
pub mod data;
pub mod faq;
pub mod templates;

pub use cache::{CachedResponse, ResponseCache, text_hash};
pub use cascade::{AnswerSource, CascadeOutcome, ResponseCascade};
pub use data::{DataAnswer, DataMapping, DataSourceKind, DataStage, extract_entities, map_data_source};
pub use faq::{FaqEntry, FaqIndex, FaqMatch, ScoringWeights};
pub use templates::{TemplateResponse, template_match};
