// src/main.rs

use contend::errors::exit_code;
use contend::{cli, logging, run};
use tracing::error;

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("contend error: {err:?}");
        std::process::exit(exit_code::RUNTIME);
    }

    if let Err(err) = run(args).await {
        error!(error = %err, "run aborted");
        eprintln!("contend error: {err}");
        std::process::exit(err.exit_code());
    }
}
