use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tool_invoke_core::contract::ToolInvocationRequest;
use tool_invoke_core::handler::{invoke_with_callback, noop_callback};
use tool_invoke_lambda::adapters::lambda_context::LambdaContext;
use tool_invoke_lambda::handlers::maps_directions::{DirectionsConfig, MapsDirectionsHandler};

async fn handle_request(
    handler: &MapsDirectionsHandler,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let request = ToolInvocationRequest::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid tool request: {error}")))?;
    let context = LambdaContext::new(event.context);

    invoke_with_callback(handler, &request, &context, noop_callback())
        .await
        .map_err(|error| Error::from(format!("{}: {error}", error.error_code())))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();

    let config = DirectionsConfig::from_env()
        .map_err(|error| Error::from(format!("invalid directions configuration: {error}")))?;
    let handler = MapsDirectionsHandler::new(config);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move { handle_request(&handler, event).await }
    }))
    .await
}
