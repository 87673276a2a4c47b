//! Runtime-agnostic half of the tool harness: what a `tool_use` request
//! looks like, what a handler may ask of its host, and how one call is
//! settled into a report. Nothing here talks to AWS or to a maps provider.

pub mod context;
pub mod contract;
pub mod fixture;
pub mod handler;
pub mod outcome;
