//! Local stand-in for the hosting runtime: one fixed request, one fixed
//! context, one handler call.
//!
//! The simulated deadline never counts down and no timeout is applied, so a
//! handler that never settles keeps [`InvocationSimulator::run`] pending
//! forever.

use std::fmt;
use std::io::{self, Write};

use tool_invoke_core::contract::request_fingerprint;
use tool_invoke_core::fixture::InvocationFixture;
use tool_invoke_core::handler::{invoke_with_callback, noop_callback, ToolHandler};
use tool_invoke_core::outcome::{InvocationOutcome, InvocationPhase, InvocationReport};
use tracing::{error, info, warn};

const RESULT_RULE: &str = "------------------------";

pub struct InvocationSimulator<H> {
    handler: H,
    fixture: InvocationFixture,
}

impl<H: ToolHandler> InvocationSimulator<H> {
    pub fn new(handler: H) -> Self {
        Self::with_fixture(handler, InvocationFixture::default())
    }

    pub fn with_fixture(handler: H, fixture: InvocationFixture) -> Self {
        Self { handler, fixture }
    }

    /// Runs the handler once, printing progress and the result to stdout and
    /// failures to stderr.
    pub async fn run(&self) -> InvocationReport {
        self.run_with_output(&mut io::stdout(), &mut io::stderr())
            .await
    }

    /// Same as [`run`](Self::run) with caller-supplied operator streams.
    /// Handler failures are reported on `err` and never propagated.
    pub async fn run_with_output<O: Write, E: Write>(
        &self,
        out: &mut O,
        err: &mut E,
    ) -> InvocationReport {
        emit(out, format_args!("Starting integration test..."));

        emit(out, format_args!("Creating test event..."));
        let request = self.fixture.request.clone();
        let context = self.fixture.context.clone();
        let fingerprint = request_fingerprint(&request).unwrap_or_else(|encode_error| {
            warn!(request_id = %request.id, %encode_error, "request fingerprint unavailable");
            String::new()
        });

        emit(out, format_args!("Testing handler..."));
        info!(
            request_id = %request.id,
            tool = %request.name,
            request_fingerprint = %fingerprint,
            phase = ?InvocationPhase::Running,
            "invoking tool handler"
        );
        let settled =
            invoke_with_callback(&self.handler, &request, &context, noop_callback()).await;

        match &settled {
            Ok(value) => {
                emit(out, format_args!("\nTest Results:"));
                emit(out, format_args!("{RESULT_RULE}"));
                emit(out, format_args!("result: {value:#}"));
                emit(out, format_args!("{RESULT_RULE}"));
            }
            Err(failure) => {
                error!(
                    request_id = %request.id,
                    error_code = failure.error_code(),
                    "handler invocation failed"
                );
                emit(err, format_args!("Test failed: {failure}"));
            }
        }

        let report = InvocationReport::completed(
            &request,
            fingerprint,
            InvocationOutcome::from_result(settled),
        );
        info!(
            request_id = %report.request_id,
            status = report.outcome.status(),
            phase = ?report.phase,
            "invocation settled"
        );
        report
    }
}

fn emit(stream: &mut impl Write, line: fmt::Arguments<'_>) {
    if let Err(write_error) = writeln!(stream, "{line}") {
        warn!(%write_error, "failed to write operator output");
    }
}
