use clap::Parser;
use voicesearch::cli::{self, Cli};
use voicesearch::config::CONFIG;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize tracing subscriber (handles both tracing and log crate)
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = args.apply_overrides(CONFIG.clone());
    if let Err(e) = cli::run(args, config).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
