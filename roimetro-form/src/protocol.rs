//! Form protocol — request parsing, execution, and the edit log.
//!
//! This is where the input clamp is enforced:
//! 1. Raw text -> parse into a FormRequest (reject if invalid)
//! 2. Validate amounts (reject if out of domain)
//! 3. Execute the edit against the form state
//! 4. Record the edit in the session transcript

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::FormResult;
use crate::ops::{Field, FormOperation};
use crate::state::{validate_amount, FormSnapshot, FormState};

/// A request from a caller to the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRequest {
    /// The operation to perform.
    pub operation: FormOperation,

    /// Request ID for tracking.
    pub request_id: String,
}

/// A response from the form to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    /// The state after the operation, outputs freshly derived.
    pub snapshot: FormSnapshot,

    /// Request ID (echoed back).
    pub request_id: String,

    /// Was this operation read-only?
    pub read_only: bool,
}

/// Transcript entry for one applied (or rejected) operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditEntry {
    pub timestamp: String,
    pub request_id: String,
    pub operation: String,
    pub was_read_only: bool,
    pub success: bool,
    pub error: Option<String>,
    pub revision_after: u64,
}

/// A form session: the state plus the transcript of every edit applied
/// to it.
pub struct FormSession {
    state: FormState,

    /// Transcript of all operations, rejected ones included.
    pub edit_log: Vec<EditEntry>,
}

impl FormSession {
    pub fn new() -> Self {
        FormSession {
            state: FormState::new(),
            edit_log: Vec::new(),
        }
    }

    /// Parse raw JSON into a validated FormRequest.
    ///
    /// First line of defense: if the text doesn't parse into a valid
    /// operation with in-domain amounts, it's rejected here and the
    /// state is never touched.
    pub fn parse_request(&self, raw_json: &str) -> FormResult<FormRequest> {
        let request: FormRequest = serde_json::from_str(raw_json)?;
        self.validate_operation(&request.operation)?;
        Ok(request)
    }

    /// Validate operation parameters without executing.
    fn validate_operation(&self, op: &FormOperation) -> FormResult<()> {
        match op {
            FormOperation::SetAdSpend { amount } => {
                validate_amount(Field::AdSpend, *amount)?;
            }
            FormOperation::SetProductPrice { amount } => {
                validate_amount(Field::ProductPrice, *amount)?;
            }
            FormOperation::SetUnitCogs { amount } => {
                validate_amount(Field::UnitCogs, *amount)?;
            }
            // Counts are already clamped by their type; the rest carry
            // no numeric parameters.
            _ => {}
        }
        Ok(())
    }

    /// Execute a request and record it in the edit log.
    pub fn execute(&mut self, request: FormRequest) -> FormResult<FormResponse> {
        let read_only = request.operation.is_read_only();
        let result = self.state.apply(&request.operation);

        if let Err(e) = &result {
            log::warn!("request_id={} rejected: {}", request.request_id, e);
        }

        self.edit_log.push(EditEntry {
            timestamp: Utc::now().to_rfc3339(),
            request_id: request.request_id.clone(),
            operation: request.operation.describe(),
            was_read_only: read_only,
            success: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
            revision_after: self.state.revision(),
        });

        let snapshot = result?;
        Ok(FormResponse {
            snapshot,
            request_id: request.request_id,
            read_only,
        })
    }

    /// Parse and execute in one step.
    pub fn handle(&mut self, raw_json: &str) -> FormResult<FormResponse> {
        let request = self.parse_request(raw_json)?;
        self.execute(request)
    }

    /// Read-only view of the underlying state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Re-derive the outputs from the current inputs.
    pub fn snapshot(&self) -> FormSnapshot {
        self.state.snapshot()
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}
