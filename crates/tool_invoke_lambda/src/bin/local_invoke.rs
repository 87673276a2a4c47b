use tool_invoke_lambda::handlers::maps_directions::MapsDirectionsHandler;
use tool_invoke_lambda::simulator::InvocationSimulator;
use tracing::{info, Level};

#[tokio::main]
async fn main() {
    // stdout carries the operator result lines, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let simulator = InvocationSimulator::new(MapsDirectionsHandler::default());
    // Both outcomes exit normally.
    let report = simulator.run().await;
    info!(status = report.outcome.status(), "local invocation finished");
}
