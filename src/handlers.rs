use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{Result, ThinkingError};
use crate::ledger::ThoughtLedger;
use crate::models::{FailurePayload, ThoughtSummary};
use crate::validation::InputValidator;

/// Fixed body used if even the failure payload cannot be serialized
const FALLBACK_FAILURE: &str = "{\n  \"error\": \"Internal error\",\n  \"status\": \"failed\"\n}";

/// Handler for the sequentialthinking tool
pub struct ThinkingHandler {
    validator: InputValidator,
    ledger: Mutex<ThoughtLedger>,
}

impl ThinkingHandler {
    pub fn new(log_thoughts: bool) -> Self {
        Self {
            validator: InputValidator::new(),
            ledger: Mutex::new(ThoughtLedger::new(log_thoughts)),
        }
    }

    /// Validate and record one thought
    pub async fn process_thought(&self, input: &Value) -> Result<ThoughtSummary> {
        let record = self.validator.validate(input).map_err(|e| {
            tracing::warn!("Rejected thought: {}", e);
            ThinkingError::from(e)
        })?;

        let mut ledger = self.ledger.lock().await;
        let summary = ledger.record(record);
        tracing::debug!(
            "Recorded thought {}/{} (history: {}, branches: {})",
            summary.thought_number,
            summary.total_thoughts,
            summary.thought_history_length,
            summary.branches.len()
        );
        Ok(summary)
    }

    /// Run one tool call. Failures come back as an error result, never as `Err`.
    pub async fn handle_call(&self, input: &Value) -> CallToolResult {
        let outcome = match self.process_thought(input).await {
            Ok(summary) => serde_json::to_string_pretty(&summary).map_err(ThinkingError::from),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(text) => success_result(text),
            Err(e) => {
                if !matches!(e, ThinkingError::Validation(_)) {
                    tracing::error!("sequentialthinking {} error: {}", e.kind(), e);
                }
                failure_result(&e.to_string())
            }
        }
    }

    pub async fn history_len(&self) -> usize {
        self.ledger.lock().await.history_len()
    }

    pub async fn branch_ids(&self) -> Vec<String> {
        self.ledger.lock().await.branch_ids().to_vec()
    }

    pub async fn branch_len(&self, branch_id: &str) -> Option<usize> {
        self.ledger.lock().await.branch_len(branch_id)
    }
}

/// Success result; `isError` is left out entirely
pub fn success_result(text: String) -> CallToolResult {
    let mut result = CallToolResult::success(vec![Content::text(text)]);
    result.is_error = None;
    result
}

/// Error result carrying `{ "error": .., "status": "failed" }`
pub fn failure_result(message: &str) -> CallToolResult {
    let text = serde_json::to_string_pretty(&FailurePayload::new(message))
        .unwrap_or_else(|_| FALLBACK_FAILURE.to_string());
    CallToolResult::error(vec![Content::text(text)])
}
