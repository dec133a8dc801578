//! Subcommand implementations. Each one owns its terminal output; log
//! lines go to stderr so tables stay pipeable.

use std::time::Duration;

use anyhow::Context;
use tokio::sync::broadcast;

use orderdesk_client::OrdersClient;
use orderdesk_core::{FetchError, OrderReader};
use orderdesk_sync::{SubmissionController, SyncEvent, SyncStatus, SyncStore};

use crate::render;

/// Refreshes the order list once and prints it. A failed refresh still
/// prints previously cached orders, if there are any.
pub async fn list(store: &SyncStore) -> anyhow::Result<()> {
    let snapshot = store.refresh().await;

    if snapshot.status == SyncStatus::Error {
        let message = snapshot
            .last_error
            .as_ref()
            .map(|failure| failure.message.clone())
            .unwrap_or_else(|| "refresh failed".to_string());
        if snapshot.orders.is_empty() {
            anyhow::bail!("could not fetch orders: {}", message);
        }
        tracing::warn!("showing cached orders; refresh failed: {}", message);
    }

    if snapshot.orders.is_empty() {
        println!("No orders yet.");
    } else {
        print!("{}", render::format_table(&snapshot.orders));
    }
    Ok(())
}

/// Submits an order and prints the list once the follow-up refresh lands.
pub async fn add(
    controller: &SubmissionController,
    store: &SyncStore,
    item_count: u32,
) -> anyhow::Result<()> {
    // Subscribe first so the refresh triggered by the submission cannot
    // slip past unobserved.
    let mut events = store.subscribe();

    match controller.submit(item_count).await? {
        Some(id) => println!("Created order #{}.", id),
        None => println!("Order created."),
    }

    loop {
        match events.recv().await {
            Ok(SyncEvent::RefreshSettled { .. }) => break,
            Ok(SyncEvent::RefreshStarted) => {}
            Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    let snapshot = store.snapshot();
    if !snapshot.orders.is_empty() {
        print!("{}", render::format_table(&snapshot.orders));
    }
    Ok(())
}

/// Fetches one order and prints it. An unknown id is an answer, not an
/// error.
pub async fn show(client: &OrdersClient, id: i64) -> anyhow::Result<()> {
    match client.fetch_order(id).await {
        Ok(order) => {
            print!("{}", render::format_detail(&order));
            Ok(())
        }
        Err(FetchError::Status(404)) => {
            println!("Order #{} not found.", id);
            Ok(())
        }
        Err(err) => Err(err).context(format!("could not fetch order #{}", id)),
    }
}

/// Re-renders the order list every `interval_secs` seconds until killed.
pub async fn watch(store: &SyncStore, interval_secs: u64) -> anyhow::Result<()> {
    let mut events = store.subscribe();
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        tokio::select! {
            _ = ticker.tick() => store.invalidate(),
            event = events.recv() => match event {
                Ok(SyncEvent::RefreshSettled { .. }) => {
                    let snapshot = store.snapshot();
                    if snapshot.status == SyncStatus::Error {
                        if let Some(failure) = &snapshot.last_error {
                            tracing::warn!(
                                "refresh failed, showing cached orders: {}",
                                failure.message
                            );
                        }
                    }
                    println!("--- {} order(s) ---", snapshot.orders.len());
                    if snapshot.orders.is_empty() {
                        println!("No orders yet.");
                    } else {
                        print!("{}", render::format_table(&snapshot.orders));
                    }
                }
                Ok(SyncEvent::RefreshStarted) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
    Ok(())
}

/// Probes the service health endpoint.
pub async fn health(client: &OrdersClient) -> anyhow::Result<()> {
    client
        .check_health()
        .await
        .context("order service health check failed")?;
    println!("Order service is healthy.");
    Ok(())
}
