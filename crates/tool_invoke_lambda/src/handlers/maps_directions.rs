use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tool_invoke_core::context::ExecutionContext;
use tool_invoke_core::contract::{ToolInvocationRequest, ToolResult};
use tool_invoke_core::handler::{HandlerError, ToolHandler};
use tracing::info;

pub const MAPS_DIRECTIONS_TOOL: &str = "maps_directions";
pub const DEFAULT_DIRECTIONS_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/directions/json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DRIVING" => Ok(Self::Driving),
            "WALKING" => Ok(Self::Walking),
            "BICYCLING" => Ok(Self::Bicycling),
            "TRANSIT" => Ok(Self::Transit),
            _ => Err(format!(
                "Unsupported travel_mode '{raw}' (expected DRIVING, WALKING, BICYCLING, or TRANSIT)"
            )),
        }
    }

    fn as_query_value(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsConfig {
    pub endpoint: String,
    pub default_travel_mode: TravelMode,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DIRECTIONS_ENDPOINT.to_string(),
            default_travel_mode: TravelMode::Driving,
        }
    }
}

impl DirectionsConfig {
    /// Resolves configuration through `lookup`, falling back to defaults for
    /// unset or blank keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();
        let endpoint = lookup("MAPS_DIRECTIONS_ENDPOINT")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.endpoint);
        let default_travel_mode = match lookup("MAPS_DEFAULT_TRAVEL_MODE") {
            Some(raw) if !raw.trim().is_empty() => TravelMode::parse(&raw)?,
            _ => defaults.default_travel_mode,
        };

        Ok(Self {
            endpoint,
            default_travel_mode,
        })
    }

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsBody {
    #[serde(flatten)]
    pub tool_result: ToolResult,
    pub travel_mode: TravelMode,
    pub request_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DirectionsInput {
    origin: String,
    destination: String,
    travel_mode: TravelMode,
}

#[derive(Serialize)]
struct DirectionsQuery<'a> {
    origin: &'a str,
    destination: &'a str,
    mode: &'static str,
}

/// Translates `maps_directions` tool requests into provider directions
/// requests. Nothing is sent over the network and no API key is attached.
#[derive(Debug, Clone, Default)]
pub struct MapsDirectionsHandler {
    config: DirectionsConfig,
}

impl MapsDirectionsHandler {
    pub fn new(config: DirectionsConfig) -> Self {
        Self { config }
    }

    fn parse_input(&self, request: &ToolInvocationRequest) -> Result<DirectionsInput, HandlerError> {
        let origin = required_text(request, "origin")?;
        let destination = required_text(request, "destination")?;
        let travel_mode = match request.input.get("travel_mode") {
            None | Some(Value::Null) => self.config.default_travel_mode,
            Some(Value::String(raw)) => TravelMode::parse(raw)
                .map_err(|message| HandlerError::invalid_input("travel_mode", message))?,
            Some(_) => {
                return Err(HandlerError::invalid_input(
                    "travel_mode",
                    "must be a string",
                ))
            }
        };

        Ok(DirectionsInput {
            origin,
            destination,
            travel_mode,
        })
    }

    fn request_url(&self, input: &DirectionsInput) -> Result<String, HandlerError> {
        let query = serde_urlencoded::to_string(DirectionsQuery {
            origin: &input.origin,
            destination: &input.destination,
            mode: input.travel_mode.as_query_value(),
        })
        .map_err(|error| HandlerError::other(format!("failed to encode directions query: {error}")))?;

        Ok(format!("{}?{query}", self.config.endpoint))
    }
}

#[async_trait]
impl ToolHandler for MapsDirectionsHandler {
    async fn handle(
        &self,
        request: &ToolInvocationRequest,
        context: &dyn ExecutionContext,
    ) -> Result<Value, HandlerError> {
        if request.name != MAPS_DIRECTIONS_TOOL {
            return Err(HandlerError::UnsupportedTool {
                name: request.name.clone(),
            });
        }

        let remaining_ms = context.remaining_time_in_millis();
        if remaining_ms == 0 {
            return Err(HandlerError::DeadlineExceeded { remaining_ms });
        }

        let input = self.parse_input(request)?;
        let request_url = self.request_url(&input)?;
        info!(
            request_id = %context.aws_request_id(),
            tool_use_id = %request.id,
            travel_mode = input.travel_mode.as_query_value(),
            remaining_ms,
            "prepared directions request"
        );

        let content = format!(
            "Prepared {} directions from {} to {}",
            input.travel_mode.as_query_value(),
            input.origin,
            input.destination
        );
        let body = DirectionsBody {
            tool_result: ToolResult::for_request(request, content),
            travel_mode: input.travel_mode,
            request_url,
        };
        let response = ToolResponse {
            status_code: 200,
            body: serde_json::to_value(body)
                .map_err(|error| HandlerError::other(format!("failed to encode body: {error}")))?,
        };

        serde_json::to_value(response)
            .map_err(|error| HandlerError::other(format!("failed to encode response: {error}")))
    }
}

fn required_text(request: &ToolInvocationRequest, field: &str) -> Result<String, HandlerError> {
    match request.input.get(field) {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Some(Value::String(_)) => Err(HandlerError::invalid_input(field, "must not be blank")),
        Some(_) => Err(HandlerError::invalid_input(field, "must be a string")),
        None => Err(HandlerError::invalid_input(field, "is required")),
    }
}
