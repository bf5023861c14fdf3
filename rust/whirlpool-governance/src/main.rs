// Whirlpool Governance - Operator entry point
// Principle: Every fee change is signed, bounded and written whole

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use whirlpool_governance::cli::runner::run;
use whirlpool_governance::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_filter: &str = if cli.verbose { "debug" } else { &cli.log_level };

    // Logs on stderr, records on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)),
        )
        .init();

    info!("whirlpool-gov v{}", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&cli, &mut out) {
        error!("Command failed: {}", e);
        return Err(anyhow::anyhow!("{}", e));
    }

    Ok(())
}
