//! bcn - command-line client for the Barcelona platform

use clap::Parser;
use tracing_subscriber::EnvFilter;

use barcelona_cli::application::OperationFailed;
use barcelona_cli::cli::Cli;

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "BCN_LOG";

fn init_tracing(debug: bool) {
    let default = if debug { "barcelona_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
        let code = e.downcast_ref::<OperationFailed>().map_or(1, |f| f.code);
        std::process::exit(code);
    }
}
