use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");
    info!(service = "books", event = "start", pid, version, "book catalog service starting");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "books", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(server::run_books()) {
        Ok(()) => {
            info!(service = "books", event = "stop", pid, "book catalog service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "books", event = "run_failed", error = %e, "book catalog service exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
