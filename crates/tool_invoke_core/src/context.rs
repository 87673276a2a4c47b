//! The execution environment a handler sees during one invocation.
//!
//! Handlers depend only on [`ExecutionContext`]. [`SimulatedContext`] is the
//! in-memory implementation used for local runs; hosting runtimes provide
//! their own adapter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const SIMULATED_REMAINING_TIME_MS: u64 = 30_000;

pub trait ExecutionContext: Send + Sync {
    fn function_name(&self) -> &str;
    fn function_version(&self) -> &str;
    fn invoked_function_arn(&self) -> &str;
    fn memory_limit_in_mb(&self) -> u32;
    fn aws_request_id(&self) -> &str;
    fn log_group_name(&self) -> &str;
    fn log_stream_name(&self) -> &str;

    /// Milliseconds left before the host reclaims the invocation.
    fn remaining_time_in_millis(&self) -> u64;

    /// Whether the host waits for outstanding asynchronous work before
    /// reclaiming the execution slot.
    fn callback_waits_for_empty_event_loop(&self) -> bool;

    // Legacy terminal-state signals. Hosts that settle invocations through
    // the handler's return value ignore them.
    fn done(&self) {}
    fn fail(&self, _message: &str) {}
    fn succeed(&self, _result: &Value) {}
}

/// Fixed, in-memory execution context. The deadline query always reports
/// [`SIMULATED_REMAINING_TIME_MS`], so timeout-aware handler logic cannot be
/// exercised through it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedContext {
    pub callback_waits_for_empty_event_loop: bool,
    pub function_name: String,
    pub function_version: String,
    pub invoked_function_arn: String,
    #[serde(rename = "memoryLimitInMB")]
    pub memory_limit_in_mb: u32,
    pub aws_request_id: String,
    pub log_group_name: String,
    pub log_stream_name: String,
    pub remaining_time_in_millis: u64,
}

impl SimulatedContext {
    /// Builds a local context for `function_name`, deriving the ARN and log
    /// group the way the hosting platform names them.
    pub fn local(function_name: &str, request_id: &str) -> Self {
        Self {
            callback_waits_for_empty_event_loop: true,
            function_name: function_name.to_string(),
            function_version: "1".to_string(),
            invoked_function_arn: format!(
                "arn:aws:lambda:local:000000000000:function:{function_name}"
            ),
            memory_limit_in_mb: 128,
            aws_request_id: request_id.to_string(),
            log_group_name: format!("/aws/lambda/{function_name}"),
            log_stream_name: request_id.to_string(),
            remaining_time_in_millis: SIMULATED_REMAINING_TIME_MS,
        }
    }
}

impl ExecutionContext for SimulatedContext {
    fn function_name(&self) -> &str {
        &self.function_name
    }

    fn function_version(&self) -> &str {
        &self.function_version
    }

    fn invoked_function_arn(&self) -> &str {
        &self.invoked_function_arn
    }

    fn memory_limit_in_mb(&self) -> u32 {
        self.memory_limit_in_mb
    }

    fn aws_request_id(&self) -> &str {
        &self.aws_request_id
    }

    fn log_group_name(&self) -> &str {
        &self.log_group_name
    }

    fn log_stream_name(&self) -> &str {
        &self.log_stream_name
    }

    fn remaining_time_in_millis(&self) -> u64 {
        self.remaining_time_in_millis
    }

    fn callback_waits_for_empty_event_loop(&self) -> bool {
        self.callback_waits_for_empty_event_loop
    }

    fn done(&self) {
        debug!(request_id = %self.aws_request_id, "simulated context received done");
    }

    fn fail(&self, message: &str) {
        debug!(request_id = %self.aws_request_id, reason = message, "simulated context received fail");
    }

    fn succeed(&self, _result: &Value) {
        debug!(request_id = %self.aws_request_id, "simulated context received succeed");
    }
}
