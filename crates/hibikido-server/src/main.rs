use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hibikido_server::config::HibikidoConfig;

/// Hibikidō: a semantic-search-driven sound invocation server.
#[derive(Parser, Debug)]
#[command(name = "hibikido")]
#[command(about = "Semantic-search-driven sound invocation server")]
#[command(version)]
struct Args {
    /// Path to the config file (sections: mongodb, embedding, osc, search, orchestrator).
    #[arg(long)]
    config: Option<String>,

    /// Log level filter, e.g. "info", "debug", "hibikido_server=debug".
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match HibikidoConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = hibikido_server::server::run(config).await {
        tracing::error!(error = %err, "hibikido exited with an error");
        std::process::exit(1);
    }
}
