use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tool_invoke_core::context::ExecutionContext;
use tool_invoke_core::contract::ToolInvocationRequest;
use tool_invoke_core::handler::{HandlerError, ToolHandler};

#[derive(Debug, Clone)]
pub struct ObservedCall {
    pub request: ToolInvocationRequest,
    pub remaining_readings: Vec<u64>,
    pub function_name: String,
}

/// Records every call and resolves with a fixed response.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<ObservedCall>>>,
}

impl RecordingHandler {
    pub fn calls(&self) -> Vec<ObservedCall> {
        self.calls.lock().expect("poisoned mutex").clone()
    }
}

#[async_trait]
impl ToolHandler for RecordingHandler {
    async fn handle(
        &self,
        request: &ToolInvocationRequest,
        context: &dyn ExecutionContext,
    ) -> Result<Value, HandlerError> {
        let mut remaining_readings = Vec::new();
        for _ in 0..3 {
            remaining_readings.push(context.remaining_time_in_millis());
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push(ObservedCall {
                request: request.clone(),
                remaining_readings,
                function_name: context.function_name().to_string(),
            });
        Ok(json!({"statusCode": 200, "body": {"text": "ok"}}))
    }
}

pub struct RejectingHandler(pub HandlerError);

#[async_trait]
impl ToolHandler for RejectingHandler {
    async fn handle(
        &self,
        _request: &ToolInvocationRequest,
        _context: &dyn ExecutionContext,
    ) -> Result<Value, HandlerError> {
        Err(self.0.clone())
    }
}

pub struct PanickingHandler;

#[async_trait]
impl ToolHandler for PanickingHandler {
    async fn handle(
        &self,
        _request: &ToolInvocationRequest,
        _context: &dyn ExecutionContext,
    ) -> Result<Value, HandlerError> {
        panic!("directions client was never configured");
    }
}

/// Never resolves, never rejects.
pub struct PendingHandler;

#[async_trait]
impl ToolHandler for PendingHandler {
    async fn handle(
        &self,
        _request: &ToolInvocationRequest,
        _context: &dyn ExecutionContext,
    ) -> Result<Value, HandlerError> {
        std::future::pending().await
    }
}

/// Panics inside `handle` itself, before any future exists to poll.
pub struct EagerPanickingHandler;

impl ToolHandler for EagerPanickingHandler {
    fn handle<'life0, 'life1, 'life2, 'fut>(
        &'life0 self,
        _request: &'life1 ToolInvocationRequest,
        _context: &'life2 dyn ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = Result<Value, HandlerError>> + Send + 'fut>>
    where
        'life0: 'fut,
        'life1: 'fut,
        'life2: 'fut,
    {
        panic!("maps api key missing at call time");
    }
}

pub fn utf8(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("operator output should be utf-8")
}
