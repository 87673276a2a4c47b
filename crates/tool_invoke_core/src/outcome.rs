use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::ToolInvocationRequest;
use crate::handler::HandlerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvocationPhase {
    Running,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeError {
    pub error_code: String,
    pub error_message: String,
}

impl From<&HandlerError> for OutcomeError {
    fn from(error: &HandlerError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            error_message: error.to_string(),
        }
    }
}

/// Settled result of one invocation. The resolved value is kept opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Succeeded { result: Value },
    Failed { error: OutcomeError },
}

impl InvocationOutcome {
    pub fn from_result(result: Result<Value, HandlerError>) -> Self {
        match result {
            Ok(result) => Self::Succeeded { result },
            Err(error) => Self::Failed {
                error: OutcomeError::from(&error),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvocationReport {
    pub request_id: String,
    pub tool_name: String,
    pub request_fingerprint: String,
    pub phase: InvocationPhase,
    pub outcome: InvocationOutcome,
}

impl InvocationReport {
    pub fn completed(
        request: &ToolInvocationRequest,
        request_fingerprint: String,
        outcome: InvocationOutcome,
    ) -> Self {
        Self {
            request_id: request.id.clone(),
            tool_name: request.name.clone(),
            request_fingerprint,
            phase: InvocationPhase::Completed,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;
    use crate::contract::request_fingerprint;

    #[test]
    fn failed_outcome_records_code_and_message() {
        let outcome = InvocationOutcome::from_result(Err(HandlerError::UnsupportedTool {
            name: "weather".to_string(),
        }));

        assert_eq!(
            outcome,
            InvocationOutcome::Failed {
                error: OutcomeError {
                    error_code: "unsupported_tool".to_string(),
                    error_message: "unsupported tool 'weather'".to_string(),
                }
            }
        );
        assert_eq!(outcome.status(), "failed");
    }

    #[test]
    fn serializes_with_status_tag() {
        let outcome = InvocationOutcome::from_result(Ok(json!({"statusCode": 200})));
        let value = serde_json::to_value(&outcome).expect("outcome should serialize");

        assert_eq!(value["status"], json!("succeeded"));
        assert_eq!(value["result"]["statusCode"], json!(200));
    }

    #[test]
    fn report_is_always_completed() {
        let request = ToolInvocationRequest::tool_use("toolu_1", "maps_directions", Map::new());
        let fingerprint = request_fingerprint(&request).expect("fingerprint");
        let report = InvocationReport::completed(
            &request,
            fingerprint.clone(),
            InvocationOutcome::from_result(Ok(Value::Null)),
        );

        assert_eq!(report.phase, InvocationPhase::Completed);
        assert_eq!(report.request_id, "toolu_1");
        assert_eq!(report.request_fingerprint, fingerprint);
        assert!(report.is_success());
    }
}
