use anyhow::Result;
use clap::Parser;
use tarot_reader::app::App;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "tarot-reader")]
#[command(about = "Serve the tarot reading web app")]
struct CliArgs {
    /// Bind address override (falls back to the HOST env var, then 127.0.0.1).
    #[arg(long)]
    host: Option<String>,

    /// Port override (falls back to the PORT env var, then 3000).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tarot_reader=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tarot-reader");

    let args = CliArgs::parse();

    match App::new() {
        Ok(app) => match app.run(args.host, args.port).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Server error: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
