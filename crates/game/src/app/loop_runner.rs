use std::process::ExitCode;

use engine::run_app;
use tracing::error;

use super::bootstrap::AppWiring;

/// Hands the wired-up game to the engine loop and folds the outcome into a
/// process exit code.
pub(crate) fn run(app: AppWiring) -> ExitCode {
    if let Err(err) = run_app(app.config, Box::new(app.session)) {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
