// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The response resolution cascade.
//!
//! Stages run in a fixed order, each only if the previous one did not clear
//! its confidence bar: FAQ, cache, structured data, templates, and finally
//! the model router. Stage misses are "did not qualify" results, not errors.
//! Answers from the last three stages are written back into the cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reva_config::RevaConfig;
use reva_context::{ContextStore, ConversationContext};
use reva_core::{ChatMessage, ChatRole, ConversationId, QueryKind, RevaError};
use reva_router::{ModelRouter, QueryClassifier};
use serde::Serialize;
use serde_json::Value;
use strum::Display;
use tracing::{debug, info, warn};

use crate::cache::{CachedResponse, ResponseCache, text_hash};
use crate::data::{DataStage, extract_entities, map_data_source};
use crate::faq::FaqIndex;
use crate::templates::template_match;

/// Which stage produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Faq,
    Cache,
    Database,
    Template,
    Ai,
}

/// The cascade's answer for one turn.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeOutcome {
    pub answer: String,
    pub source: AnswerSource,
    pub confidence: f64,
    pub tokens_used: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub requires_agent: bool,
    pub processing_time_ms: u64,
}

/// Confidence assigned to accepted AI answers; above MEDIUM so they are
/// cached, below data-stage answers which come straight from records.
const AI_ANSWER_CONFIDENCE: f64 = 0.75;

const APOLOGY: &str = "I'm sorry, I wasn't able to answer that right now. \
     I've flagged your question for one of our agents, who will follow up \
     with you directly.";

/// Orchestrates the five resolution stages for each incoming question.
pub struct ResponseCascade {
    config: RevaConfig,
    faq: FaqIndex,
    cache: ResponseCache,
    data_stage: DataStage,
    router: ModelRouter,
    store: Arc<dyn ContextStore>,
    classifier: QueryClassifier,
}

impl ResponseCascade {
    pub fn new(
        config: RevaConfig,
        faq: FaqIndex,
        data_stage: DataStage,
        router: ModelRouter,
        store: Arc<dyn ContextStore>,
    ) -> Self {
        Self {
            config,
            faq,
            cache: ResponseCache::new(),
            data_stage,
            router,
            store,
            classifier: QueryClassifier::new(),
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Resolve one question through the cascade.
    pub async fn resolve(
        &self,
        conversation: &ConversationId,
        question: &str,
    ) -> Result<CascadeOutcome, RevaError> {
        let started = Instant::now();
        let context = self.store.load(conversation).await?.value;
        let context_hash = context_hash(&context);

        // Stage 1: FAQ at HIGH confidence.
        if let Some(m) = self.faq.lookup(question)
            && m.score >= self.config.cascade.high_confidence
        {
            debug!(score = m.score, "faq stage accepted");
            return Ok(self.outcome(
                m.entry.answer.clone(),
                AnswerSource::Faq,
                m.score,
                0,
                None,
                started,
            ));
        }

        // Stage 2: cache hits are authoritative regardless of stored
        // confidence.
        if let Some(hit) = self.cache.get(question, context_hash.as_deref()) {
            debug!("cache stage accepted");
            return Ok(self.outcome(
                hit.answer,
                AnswerSource::Cache,
                hit.confidence,
                hit.token_cost,
                None,
                started,
            ));
        }

        // Stage 3: structured data, gated on mapping confidence.
        let entities = extract_entities(question);
        let mapping = map_data_source(question, &entities, &context);
        if let Some(mapping) = mapping
            && mapping.confidence >= self.config.cascade.medium_confidence
        {
            match self
                .data_stage
                .answer(question, mapping, &entities, &context)
                .await
            {
                Ok(Some(answer)) if answer.confidence >= self.config.cascade.medium_confidence => {
                    debug!(source = ?mapping.source, "data stage accepted");
                    self.write_back(question, context_hash.as_deref(), &answer.text, answer.confidence, 0, false);
                    return Ok(self.outcome(
                        answer.text,
                        AnswerSource::Database,
                        answer.confidence,
                        0,
                        Some(answer.data),
                        started,
                    ));
                }
                Ok(_) => {}
                Err(error) => {
                    // A broken data backend should not kill the turn while
                    // later stages can still answer.
                    warn!(%error, "data stage failed; continuing the cascade");
                }
            }
        }

        // Stage 4: canned templates.
        if let Some(t) = template_match(question)
            && t.confidence >= self.config.cascade.medium_confidence
        {
            debug!("template stage accepted");
            self.write_back(question, context_hash.as_deref(), t.text, t.confidence, 0, false);
            return Ok(self.outcome(
                t.text.to_string(),
                AnswerSource::Template,
                t.confidence,
                0,
                None,
                started,
            ));
        }

        // Stage 5: hand off to the model router.
        let kind = self.classifier.classify(question);
        let messages = self.build_ai_messages(question, kind, &entities, &context);
        match self.router.route(conversation, messages, Some(kind)).await {
            Ok(result) => {
                let tokens = result.tokens.total();
                info!(
                    provider = result.provider.as_str(),
                    tokens, "router stage answered"
                );
                self.write_back(
                    question,
                    context_hash.as_deref(),
                    &result.text,
                    AI_ANSWER_CONFIDENCE,
                    tokens,
                    true,
                );
                Ok(self.outcome(
                    result.text,
                    AnswerSource::Ai,
                    AI_ANSWER_CONFIDENCE,
                    tokens,
                    None,
                    started,
                ))
            }
            Err(error) => {
                warn!(%error, "router stage failed; trying last-resort faq");
                if let Some(m) = self.faq.lookup(question)
                    && m.score >= self.config.cascade.low_confidence
                {
                    return Ok(self.outcome(
                        m.entry.answer.clone(),
                        AnswerSource::Faq,
                        m.score,
                        0,
                        None,
                        started,
                    ));
                }
                let mut outcome =
                    self.outcome(APOLOGY.to_string(), AnswerSource::Ai, 0.0, 0, None, started);
                outcome.requires_agent = true;
                Ok(outcome)
            }
        }
    }

    /// AI-oriented context for the router: intent and extracted hints as a
    /// system message ahead of the user question.
    fn build_ai_messages(
        &self,
        question: &str,
        kind: QueryKind,
        entities: &crate::data::ExtractedEntities,
        context: &ConversationContext,
    ) -> Vec<ChatMessage> {
        let mut hints = vec![format!("Query type: {kind}.")];
        if let Some(id) = &entities.listing_id {
            hints.push(format!("The user mentioned listing {id}."));
        }
        if let Some(city) = &entities.city {
            hints.push(format!("The user mentioned {city}."));
        }
        if let Some(active) = &context.active_listing {
            hints.push(format!(
                "The property under discussion is {} ({}).",
                active.snapshot.address, active.listing_id
            ));
        }
        if !context.search_criteria.is_empty() {
            hints.push("The user has active search filters from earlier turns.".to_string());
        }

        vec![
            ChatMessage {
                role: ChatRole::System,
                content: hints.join(" "),
                tool_calls: Vec::new(),
                tool_call_id: None,
            },
            ChatMessage::user(question),
        ]
    }

    fn write_back(
        &self,
        question: &str,
        context_hash: Option<&str>,
        answer: &str,
        confidence: f64,
        token_cost: u64,
        ai: bool,
    ) {
        if confidence < self.config.cascade.medium_confidence {
            return;
        }
        let ttl = Duration::from_secs(if ai {
            self.config.cache.ai_ttl_secs
        } else {
            self.config.cache.data_ttl_secs
        });
        self.cache.put(
            question,
            context_hash,
            CachedResponse {
                answer: answer.to_string(),
                confidence,
                token_cost,
            },
            ttl,
        );
    }

    fn outcome(
        &self,
        answer: String,
        source: AnswerSource,
        confidence: f64,
        tokens_used: u64,
        data: Option<Value>,
        started: Instant,
    ) -> CascadeOutcome {
        CascadeOutcome {
            answer,
            source,
            confidence,
            tokens_used,
            data,
            requires_agent: false,
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Hash of the conversation state that shapes answers. `None` for a fresh
/// context, so stateless questions share context-agnostic cache entries.
fn context_hash(context: &ConversationContext) -> Option<String> {
    if context.search_criteria.is_empty()
        && context.shown_listings.is_empty()
        && context.active_listing.is_none()
    {
        return None;
    }
    let fingerprint = serde_json::json!({
        "criteria": context.search_criteria,
        "shown": context.shown_listings.iter().map(|s| &s.listing_id).collect::<Vec<_>>(),
        "active": context.active_listing.as_ref().map(|a| &a.listing_id),
    });
    Some(text_hash(&fingerprint.to_string()))
}
