//! The fixed request and context every local run uses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::SimulatedContext;
use crate::contract::ToolInvocationRequest;

pub const FIXTURE_REQUEST_ID: &str = "toolu_01VP3mpAtB5beEzV7HuAvYvU";
pub const FIXTURE_TOOL_NAME: &str = "maps_directions";
pub const FIXTURE_ORIGIN: &str = "Narita International Airport, Narita, Chiba, Japan";
pub const FIXTURE_DESTINATION: &str = "Shibuya Station, Tokyo, Japan";
pub const FIXTURE_TRAVEL_MODE: &str = "TRANSIT";

pub const FIXTURE_FUNCTION_NAME: &str = "GoogleMapsLambda";
pub const FIXTURE_AWS_REQUEST_ID: &str = "local-test";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvocationFixture {
    pub request: ToolInvocationRequest,
    pub context: SimulatedContext,
}

impl Default for InvocationFixture {
    fn default() -> Self {
        Self {
            request: maps_directions_request(),
            context: SimulatedContext::local(FIXTURE_FUNCTION_NAME, FIXTURE_AWS_REQUEST_ID),
        }
    }
}

pub fn maps_directions_request() -> ToolInvocationRequest {
    let mut input = Map::new();
    input.insert("origin".to_string(), Value::from(FIXTURE_ORIGIN));
    input.insert("destination".to_string(), Value::from(FIXTURE_DESTINATION));
    input.insert("travel_mode".to_string(), Value::from(FIXTURE_TRAVEL_MODE));
    ToolInvocationRequest::tool_use(FIXTURE_REQUEST_ID, FIXTURE_TOOL_NAME, input)
}
