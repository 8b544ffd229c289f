use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");
    info!(service = "auth", event = "start", pid, version, "auth service starting");

    // Panic hook so a crashed worker still leaves a trace in the logs.
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "auth", event = "panic", pid, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "auth", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(server::run_auth()) {
        Ok(()) => {
            info!(service = "auth", event = "stop", pid, "auth service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "auth", event = "run_failed", error = %e, "auth service exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
