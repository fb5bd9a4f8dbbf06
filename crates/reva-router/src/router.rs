// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost-aware provider selection with automatic fallback.
//!
//! Orchestrates one turn: classify, build the chain, then walk it. Each
//! entry gets exactly one attempt; provider-level failures move to the next
//! entry while alternatives remain. Rate-limited providers are skipped
//! without a network call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reva_config::RevaConfig;
use reva_core::{
    ChatMessage, ChatRequest, ChatRole, ConversationId, ProviderResult, QueryKind, RevaError,
    RoutingInfo, ToolDefinition, ToolExecutor,
};
use tracing::{debug, info, warn};

use crate::chain::{ProviderRegistry, ProviderSpec, build_chain};
use crate::classifier::QueryClassifier;
use crate::limits::DailyRateLimiter;
use crate::tool_loop::{LoopOutcome, run_tool_loop};

/// Routes each turn to a provider chain and drives the call.
pub struct ModelRouter {
    config: RevaConfig,
    registry: ProviderRegistry,
    executor: Arc<dyn ToolExecutor>,
    tool_definitions: Vec<ToolDefinition>,
    limiter: DailyRateLimiter,
    classifier: QueryClassifier,
}

impl ModelRouter {
    pub fn new(
        config: RevaConfig,
        registry: ProviderRegistry,
        executor: Arc<dyn ToolExecutor>,
        tool_definitions: Vec<ToolDefinition>,
    ) -> Self {
        Self {
            config,
            registry,
            executor,
            tool_definitions,
            limiter: DailyRateLimiter::new(),
            classifier: QueryClassifier::new(),
        }
    }

    /// Handle one turn: classify (unless the caller already did), build the
    /// provider chain, and attempt entries in order until one succeeds.
    pub async fn route(
        &self,
        conversation: &ConversationId,
        messages: Vec<ChatMessage>,
        kind: Option<QueryKind>,
    ) -> Result<ProviderResult, RevaError> {
        let kind = kind.unwrap_or_else(|| {
            let last_user = messages
                .iter()
                .rev()
                .find(|m| m.role == ChatRole::User)
                .map(|m| m.content.as_str())
                .unwrap_or_default();
            self.classifier.classify(last_user)
        });

        let chain = build_chain(kind, &self.config, &self.registry);
        if chain.is_empty() {
            return Err(RevaError::NoProvidersConfigured);
        }

        let started = Instant::now();
        let mut attempts = 0usize;

        for spec in &chain {
            let Some(adapter) = self.registry.get(&spec.provider) else {
                continue;
            };
            let limit = self
                .config
                .providers
                .get(&spec.provider)
                .and_then(|p| p.daily_request_limit);
            if let Err(error) = self.limiter.check(&spec.provider, limit) {
                debug!(provider = spec.provider.as_str(), %error, "skipping rate-limited provider");
                continue;
            }

            let use_tools = kind.wants_tools() && adapter.supports_tools();
            let request = ChatRequest {
                model: spec.model.clone(),
                system_prompt: self.config.agent.system_prompt.clone(),
                messages: messages.clone(),
                tools: if use_tools {
                    self.tool_definitions.clone()
                } else {
                    Vec::new()
                },
                max_tokens: self.config.routing.max_tokens,
            };

            attempts += 1;
            self.limiter.record(&spec.provider, limit);

            match self
                .attempt(adapter.as_ref(), conversation, spec, request, use_tools)
                .await
            {
                Ok(outcome) => {
                    let fallback_used = attempts > 1;
                    info!(
                        provider = spec.provider.as_str(),
                        model = spec.model.as_str(),
                        query_type = %kind,
                        tools_enabled = use_tools,
                        fallback_used,
                        "routed turn"
                    );
                    return Ok(ProviderResult {
                        success: true,
                        text: outcome.text,
                        role: ChatRole::Assistant,
                        finish_reason: outcome.finish_reason,
                        tokens: outcome.usage,
                        model: outcome.model,
                        provider: spec.provider.clone(),
                        response_time_ms: started.elapsed().as_millis() as u64,
                        tool_calls_made: outcome.tool_calls_made,
                        tool_iterations: outcome.iterations,
                        routing: Some(RoutingInfo {
                            query_type: kind,
                            provider_used: spec.provider.clone(),
                            model_used: spec.model.clone(),
                            tools_enabled: use_tools,
                            fallback_used,
                        }),
                    });
                }
                // Exhausting the loop budget is terminal for the turn, not
                // a provider fault to retry elsewhere.
                Err(error @ RevaError::MaxIterationsReached { .. }) => return Err(error),
                Err(error) => {
                    warn!(provider = spec.provider.as_str(), %error, "provider attempt failed");
                    if !self.config.routing.fallback_enabled {
                        return Err(error);
                    }
                }
            }
        }

        Err(RevaError::AllProvidersFailed { attempts })
    }

    async fn attempt(
        &self,
        adapter: &dyn reva_core::ProviderAdapter,
        conversation: &ConversationId,
        spec: &ProviderSpec,
        request: ChatRequest,
        use_tools: bool,
    ) -> Result<LoopOutcome, RevaError> {
        let secs = if use_tools {
            self.config.routing.tool_timeout_secs
        } else {
            self.config.routing.chat_timeout_secs
        };
        let deadline = Duration::from_secs(secs);

        let run = async {
            if use_tools {
                run_tool_loop(adapter, self.executor.as_ref(), conversation, request).await
            } else {
                let reply = adapter.chat(request).await?;
                Ok(LoopOutcome {
                    text: reply.text,
                    finish_reason: reply.finish_reason,
                    usage: reply.usage,
                    tool_calls_made: Vec::new(),
                    iterations: 1,
                    model: reply.model,
                })
            }
        };

        match tokio::time::timeout(deadline, run).await {
            Ok(result) => result,
            Err(_) => Err(RevaError::ProviderRequestFailed {
                provider: spec.provider.clone(),
                message: format!("timed out after {secs}s"),
            }),
        }
    }
}
