mod bootstrap;
mod catalog;
mod gameplay;
mod loop_runner;

use std::process::ExitCode;

use tracing::error;

/// Builds the app and runs it to completion.
pub(crate) fn run() -> ExitCode {
    match bootstrap::build_app() {
        Ok(app) => loop_runner::run(app),
        Err(err) => {
            error!(error = %err, "startup_failed");
            ExitCode::FAILURE
        }
    }
}
