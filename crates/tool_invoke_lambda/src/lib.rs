//! Lambda-facing adapters, handlers, and the local invocation simulator.
//!
//! Handlers here depend only on the `tool_invoke_core` context interface, so
//! the same handler runs under `lambda_runtime` and under the simulator.

pub mod adapters;
pub mod handlers;
pub mod simulator;
