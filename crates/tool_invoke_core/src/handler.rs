use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::ExecutionContext;
use crate::contract::ToolInvocationRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("invalid input field '{field}': {message}")]
    InvalidInput { field: String, message: String },
    #[error("unsupported tool '{name}'")]
    UnsupportedTool { name: String },
    #[error("deadline exceeded with {remaining_ms}ms remaining")]
    DeadlineExceeded { remaining_ms: u64 },
    #[error("handler panicked: {message}")]
    Panicked { message: String },
    #[error("{0}")]
    Other(String),
}

impl HandlerError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn other(message: impl std::fmt::Display) -> Self {
        Self::Other(message.to_string())
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::UnsupportedTool { .. } => "unsupported_tool",
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
            Self::Panicked { .. } => "handler_panicked",
            Self::Other(_) => "handler_failed",
        }
    }
}

/// A tool implementation invoked once per request.
///
/// The request and context are lent for the duration of the call only.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(
        &self,
        request: &ToolInvocationRequest,
        context: &dyn ExecutionContext,
    ) -> Result<Value, HandlerError>;
}

#[async_trait]
impl<T: ToolHandler + ?Sized> ToolHandler for Box<T> {
    async fn handle(
        &self,
        request: &ToolInvocationRequest,
        context: &dyn ExecutionContext,
    ) -> Result<Value, HandlerError> {
        (**self).handle(request, context).await
    }
}

/// Error-first completion callback for consumers that expect the legacy
/// calling convention instead of an awaited result.
pub type CompletionCallback = Box<dyn FnOnce(Result<&Value, &HandlerError>) + Send>;

pub fn noop_callback() -> CompletionCallback {
    Box::new(|_| {})
}

/// Runs `handler` once, folding a panic into [`HandlerError::Panicked`], then
/// hands the settled outcome to `callback` before returning it.
pub async fn invoke_with_callback(
    handler: &dyn ToolHandler,
    request: &ToolInvocationRequest,
    context: &dyn ExecutionContext,
    callback: CompletionCallback,
) -> Result<Value, HandlerError> {
    // The call itself sits inside the guarded future: an implementation may
    // panic before it hands back a future to poll.
    let settled = AssertUnwindSafe(async { handler.handle(request, context).await })
        .catch_unwind()
        .await;

    let outcome = match settled {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(request_id = %request.id, panic = %message, "tool handler panicked");
            Err(HandlerError::Panicked { message })
        }
    };

    debug!(
        request_id = %request.id,
        succeeded = outcome.is_ok(),
        "delivering outcome to completion callback"
    );
    callback(outcome.as_ref());
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
