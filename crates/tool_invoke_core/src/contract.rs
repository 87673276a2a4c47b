use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub type ToolInput = Map<String, Value>;

/// Message kinds of the agent calling protocol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    ToolUse,
    ToolResult,
    Text,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToolUse => "tool_use",
            Self::ToolResult => "tool_result",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocationRequest {
    pub id: String,
    #[serde(default)]
    pub input: ToolInput,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResult {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub tool_use_id: String,
    pub name: String,
    pub content: String,
}

impl ToolResult {
    pub fn for_request(request: &ToolInvocationRequest, content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::ToolResult,
            tool_use_id: request.id.clone(),
            name: request.name.clone(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("Request payload must be a JSON object")]
    NotAnObject,
    #[error("Malformed tool request: {0}")]
    Malformed(String),
    #[error("id cannot be empty")]
    EmptyId,
    #[error("name cannot be empty")]
    EmptyName,
    #[error("expected a tool_use message, got {}", .0.as_str())]
    UnexpectedKind(MessageKind),
    #[error("Tool request could not be encoded: {0}")]
    Encoding(String),
}

impl ToolInvocationRequest {
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: ToolInput) -> Self {
        Self {
            id: id.into(),
            input,
            name: name.into(),
            kind: MessageKind::ToolUse,
        }
    }

    /// Parses an inbound event into a validated tool-use request.
    pub fn from_value(event: Value) -> Result<Self, ContractError> {
        if !event.is_object() {
            return Err(ContractError::NotAnObject);
        }

        let request: Self = serde_json::from_value(event)
            .map_err(|error| ContractError::Malformed(error.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.id.trim().is_empty() {
            return Err(ContractError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ContractError::EmptyName);
        }
        if self.kind != MessageKind::ToolUse {
            return Err(ContractError::UnexpectedKind(self.kind));
        }
        Ok(())
    }

    pub fn input_str(&self, field: &str) -> Option<&str> {
        self.input.get(field).and_then(Value::as_str)
    }
}

/// SHA-256 of the request's JSON encoding. `serde_json::Map` keeps keys
/// sorted, so equal requests always hash equally.
pub fn request_fingerprint(request: &ToolInvocationRequest) -> Result<String, ContractError> {
    let encoded = serde_json::to_string(request)
        .map_err(|error| ContractError::Encoding(error.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(encoded.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
