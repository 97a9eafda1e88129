use anyhow::Result;
use gitcal::cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so the calendar on stdout stays clean. RUST_LOG overrides the level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    cli.execute()
}
