use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orderdesk_app::app_config::Config;
use orderdesk_app::cli::{Cli, Command};
use orderdesk_app::commands;
use orderdesk_client::OrdersClient;
use orderdesk_sync::{SubmissionController, SyncStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "orderdesk_app=info,orderdesk_sync=info,orderdesk_client=info".into()
            }),
        )
        // Tables go to stdout; keep log lines out of their way.
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let client = Arc::new(OrdersClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.request_timeout_secs),
    )?);
    let store = SyncStore::new(client.clone());
    let controller = SubmissionController::new(client.clone(), store.clone());

    match cli.command {
        Command::List => commands::list(&store).await,
        Command::Add { item_count } => commands::add(&controller, &store, item_count).await,
        Command::Show { id } => commands::show(&client, id).await,
        Command::Watch { interval } => commands::watch(&store, interval).await,
        Command::Health => commands::health(&client).await,
    }
}
