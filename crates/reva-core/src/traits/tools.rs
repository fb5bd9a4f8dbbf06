// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool executor trait consumed by the tool-calling loop.

use async_trait::async_trait;

use crate::error::RevaError;
use crate::types::{ConversationId, ToolCallRequest, ToolOutcome};

/// Executes one requested tool call against the domain data service and
/// conversation context.
///
/// Execution failures are ordinary data: the loop serializes an `Err` back
/// to the model as the tool's result, so a failed call never aborts the
/// turn on its own.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(
        &self,
        conversation: &ConversationId,
        call: &ToolCallRequest,
    ) -> Result<ToolOutcome, RevaError>;
}
