use std::sync::Arc;

use clap::Parser;
use pantrylens_core::{application::create_service, domain::common::PantryLensConfig};
use tracing_subscriber::EnvFilter;

use crate::args::Args;

mod args;
mod commands;
mod render;

fn init_logger(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pantrylens=info,pantrylens_core=info"));

    if args.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args);

    let config = PantryLensConfig::from(args.as_ref().clone());
    let service = create_service(config, args.user_id.clone()).await?;

    commands::run(&service, &args.command).await
}
