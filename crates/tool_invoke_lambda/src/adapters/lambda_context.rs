use std::time::{SystemTime, UNIX_EPOCH};

use lambda_runtime::Context;
use tool_invoke_core::context::ExecutionContext;

/// Exposes the invocation context supplied by `lambda_runtime` through the
/// handler-facing [`ExecutionContext`] interface.
#[derive(Debug, Clone)]
pub struct LambdaContext {
    inner: Context,
}

impl LambdaContext {
    pub fn new(inner: Context) -> Self {
        Self { inner }
    }

    pub fn remaining_at(&self, now_ms: u64) -> u64 {
        self.inner.deadline.saturating_sub(now_ms)
    }
}

impl ExecutionContext for LambdaContext {
    fn function_name(&self) -> &str {
        &self.inner.env_config.function_name
    }

    fn function_version(&self) -> &str {
        &self.inner.env_config.version
    }

    fn invoked_function_arn(&self) -> &str {
        &self.inner.invoked_function_arn
    }

    fn memory_limit_in_mb(&self) -> u32 {
        u32::try_from(self.inner.env_config.memory).unwrap_or(0)
    }

    fn aws_request_id(&self) -> &str {
        &self.inner.request_id
    }

    fn log_group_name(&self) -> &str {
        &self.inner.env_config.log_group
    }

    fn log_stream_name(&self) -> &str {
        &self.inner.env_config.log_stream
    }

    fn remaining_time_in_millis(&self) -> u64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        self.remaining_at(now_ms)
    }

    // The Rust runtime settles an invocation as soon as the handler future
    // returns; detached tasks are not awaited.
    fn callback_waits_for_empty_event_loop(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lambda_runtime::Config;

    use super::*;

    fn runtime_context(deadline: u64) -> Context {
        let mut context = Context::default();
        context.request_id = "8476a536-e9f4-11e8-9739-2dfe598c3fcd".to_string();
        context.deadline = deadline;
        context.invoked_function_arn =
            "arn:aws:lambda:us-east-2:123456789012:function:GoogleMapsLambda".to_string();
        let mut config = Config::default();
        config.function_name = "GoogleMapsLambda".to_string();
        config.memory = 256;
        config.version = "$LATEST".to_string();
        config.log_stream = "2026/10/19/[$LATEST]abc".to_string();
        config.log_group = "/aws/lambda/GoogleMapsLambda".to_string();
        context.env_config = Arc::new(config);
        context
    }

    #[test]
    fn exposes_runtime_identity() {
        let context = LambdaContext::new(runtime_context(0));

        assert_eq!(context.function_name(), "GoogleMapsLambda");
        assert_eq!(context.function_version(), "$LATEST");
        assert_eq!(context.memory_limit_in_mb(), 256);
        assert_eq!(
            context.aws_request_id(),
            "8476a536-e9f4-11e8-9739-2dfe598c3fcd"
        );
        assert_eq!(context.log_group_name(), "/aws/lambda/GoogleMapsLambda");
        assert!(!context.callback_waits_for_empty_event_loop());
    }

    #[test]
    fn remaining_time_reads_the_wall_clock() {
        let expired = LambdaContext::new(runtime_context(0));
        let distant = LambdaContext::new(runtime_context(u64::MAX));

        assert_eq!(expired.remaining_time_in_millis(), 0);
        assert!(distant.remaining_time_in_millis() > u64::MAX / 2);
    }

    #[test]
    fn remaining_time_counts_down_to_zero() {
        let context = LambdaContext::new(runtime_context(1_000_030_000));

        assert_eq!(context.remaining_at(1_000_000_000), 30_000);
        assert_eq!(context.remaining_at(1_000_029_999), 1);
        assert_eq!(context.remaining_at(1_000_040_000), 0);
    }

    #[test]
    fn past_deadline_reports_no_time_left() {
        let context = LambdaContext::new(runtime_context(1));

        assert_eq!(context.remaining_time_in_millis(), 0);
    }
}
