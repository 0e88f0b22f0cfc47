// bases/ui_server/src/main.rs
use clap::Parser;
use color_eyre::Result;

mod config;
mod error;
mod handlers;
mod payloads;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ui_server=info,tower_http=info".into()),
        )
        .init();

    let args = config::CliArgs::parse();
    let config = config::Config::from_args(args);

    server::run(config).await
}
