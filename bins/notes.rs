use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");
    info!(service = "notes", event = "start", pid, version, "notes service starting");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "notes", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(server::run_notes()) {
        Ok(()) => {
            info!(service = "notes", event = "stop", pid, "notes service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "notes", event = "run_failed", error = %e, "notes service exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
