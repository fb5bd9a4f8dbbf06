// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A provider adapter driven by a scripted reply queue.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use reva_core::{
    ChatRequest, FinishReason, ProviderAdapter, ProviderReply, RevaError, TokenUsage,
    ToolCallRequest,
};

/// One scripted turn for [`MockProvider`].
pub enum ScriptedReply {
    /// A final text answer.
    Text(String),
    /// An assistant turn requesting tool calls.
    ToolCalls(Vec<ToolCallRequest>),
    /// The call fails with this error.
    Fail(RevaError),
}

/// Provider adapter whose replies come from a queue.
///
/// Each `chat` call pops the next scripted reply; when the queue is empty
/// the provider answers with a canned text reply. Every call, scripted or
/// not, bumps the call counter.
pub struct MockProvider {
    name: String,
    supports_tools: bool,
    has_credentials: bool,
    script: Mutex<VecDeque<ScriptedReply>>,
    calls: AtomicU32,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_tools: true,
            has_credentials: true,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn without_tools(mut self) -> Self {
        self.supports_tools = false;
        self
    }

    pub fn without_credentials(mut self) -> Self {
        self.has_credentials = false;
        self
    }

    /// Queue a scripted reply. Replies are consumed in order.
    pub fn push(&self, reply: ScriptedReply) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.push(ScriptedReply::Text(text.into()));
    }

    pub fn push_tool_calls(&self, calls: Vec<ToolCallRequest>) {
        self.push(ScriptedReply::ToolCalls(calls));
    }

    pub fn push_failure(&self, error: RevaError) {
        self.push(ScriptedReply::Fail(error));
    }

    /// How many times `chat` has been called.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_tools(&self) -> bool {
        self.supports_tools
    }

    fn has_credentials(&self) -> bool {
        self.has_credentials
    }

    async fn chat(&self, request: ChatRequest) -> Result<ProviderReply, RevaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(ScriptedReply::Text(text)) => Ok(ProviderReply {
                text,
                tool_calls: Vec::new(),
                finish_reason: FinishReason::Stop,
                usage: TokenUsage::new(10, 5),
                model: request.model,
            }),
            Some(ScriptedReply::ToolCalls(calls)) => Ok(ProviderReply {
                text: String::new(),
                tool_calls: calls,
                finish_reason: FinishReason::ToolCalls,
                usage: TokenUsage::new(10, 5),
                model: request.model,
            }),
            Some(ScriptedReply::Fail(error)) => Err(error),
            None => Ok(ProviderReply {
                text: format!("mock reply from {}", self.name),
                tool_calls: Vec::new(),
                finish_reason: FinishReason::Stop,
                usage: TokenUsage::new(10, 5),
                model: request.model,
            }),
        }
    }
}
