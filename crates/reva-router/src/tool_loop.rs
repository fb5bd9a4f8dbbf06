// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded iterative tool execution against one provider.
//!
//! Each iteration sends the growing transcript, executes any requested tool
//! calls, and feeds the results back. Tool failures are not loop-fatal: the
//! error is serialized as the tool's result so the model can adapt on the
//! next iteration. Running out of iterations is an error, never a silent
//! partial success.

use futures::future::join_all;
use reva_core::{
    ChatMessage, ChatRequest, ConversationId, FinishReason, ProviderAdapter, RevaError,
    TokenUsage, ToolCallRecord, ToolExecutor, ToolOutcome,
};
use tracing::{debug, warn};

/// Hard cap on provider round trips within one turn.
pub const MAX_ITERATIONS: u32 = 5;

/// Result of a completed tool loop (or a single plain chat call).
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub text: String,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
    pub tool_calls_made: Vec<ToolCallRecord>,
    pub iterations: u32,
    pub model: String,
}

/// Drive the tool-calling loop until the provider returns a final answer.
///
/// Token usage accumulates across iterations and never resets. Tool calls
/// requested within one iteration are independent and execute concurrently;
/// all results are appended before the next round trip.
pub async fn run_tool_loop(
    adapter: &dyn ProviderAdapter,
    executor: &dyn ToolExecutor,
    conversation: &ConversationId,
    mut request: ChatRequest,
) -> Result<LoopOutcome, RevaError> {
    let mut usage = TokenUsage::default();
    let mut tool_calls_made = Vec::new();

    for iteration in 1..=MAX_ITERATIONS {
        let reply = adapter.chat(request.clone()).await?;
        usage.accumulate(&reply.usage);

        if reply.is_final() {
            debug!(
                provider = adapter.name(),
                iterations = iteration,
                tool_calls = tool_calls_made.len(),
                "tool loop finished"
            );
            return Ok(LoopOutcome {
                text: reply.text,
                finish_reason: reply.finish_reason,
                usage,
                tool_calls_made,
                iterations: iteration,
                model: reply.model,
            });
        }

        request
            .messages
            .push(ChatMessage::assistant_tool_calls(
                reply.text.clone(),
                reply.tool_calls.clone(),
            ));

        let executions = reply
            .tool_calls
            .iter()
            .map(|call| executor.execute(conversation, call));
        let results = join_all(executions).await;

        for (call, result) in reply.tool_calls.iter().zip(results) {
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(
                        tool = call.name.as_str(),
                        %error,
                        "tool execution failed; feeding error back to the model"
                    );
                    ToolOutcome::error(error.to_string())
                }
            };
            tool_calls_made.push(ToolCallRecord {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                success: outcome.success,
            });
            let content = serde_json::to_string(&outcome.content)
                .map_err(|e| RevaError::Internal(format!("tool result serialization: {e}")))?;
            request
                .messages
                .push(ChatMessage::tool_result(call.id.clone(), content));
        }
    }

    Err(RevaError::MaxIterationsReached {
        iterations: MAX_ITERATIONS,
    })
}
