// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rowboat serve` command implementation.
//!
//! Wires the configured catalog, access list, gateway, durable activity
//! store, and Telegram channel into the dispatch loop, then polls until a
//! shutdown signal arrives. Each inbound event runs in its own task; the
//! dispatcher serializes events per user internally.

use std::sync::Arc;

use tracing::{error, info};

use rowboat_catalog::{AccessResolver, Catalog};
use rowboat_config::model::RowboatConfig;
use rowboat_core::traits::channel::ChannelAdapter;
use rowboat_core::traits::storage::StorageAdapter;
use rowboat_core::{PluginAdapter, RowboatError};
use rowboat_dispatch::{ActivityTracker, Dispatcher};
use rowboat_gateway::{Gateway, SqliteDataStore};
use rowboat_storage::SqliteActivityStore;
use rowboat_telegram::TelegramChannel;

/// Runs the `rowboat serve` command.
pub async fn run_serve(config: RowboatConfig) -> Result<(), RowboatError> {
    init_tracing(&config.bot.log_level);
    info!(bot = %config.bot.name, "starting rowboat serve");

    let store = Arc::new(SqliteActivityStore::new(config.storage.clone()));
    store.initialize().await?;

    let access = AccessResolver::from_config(&config.access)?;
    let catalog = Catalog::from_config(&config.catalog)?;
    let gateway = Gateway::from_config(
        config.bindings.clone(),
        &config.gateway,
        Arc::new(SqliteDataStore::new()),
    );
    let activity = Arc::new(ActivityTracker::new(store.clone()));
    let dispatcher = Arc::new(Dispatcher::new(
        access,
        catalog,
        gateway,
        activity,
        config.export.compression_threshold_bytes,
    ));

    let mut channel = TelegramChannel::new(&config.telegram)?;
    channel.connect().await?;
    let channel = Arc::new(channel);

    info!("rowboat serving");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            received = channel.receive() => {
                let incoming = match received {
                    Ok(incoming) => incoming,
                    Err(e) => {
                        error!(error = %e, "inbound channel failed");
                        break;
                    }
                };
                let dispatcher = dispatcher.clone();
                let channel = channel.clone();
                tokio::spawn(async move {
                    let chat = incoming.chat;
                    for outbound in dispatcher.handle(incoming).await {
                        if let Err(e) = channel.deliver(chat, outbound).await {
                            error!(chat = chat.0, error = %e, "delivery failed");
                        }
                    }
                });
            }
        }
    }

    channel.shutdown().await?;
    store.shutdown().await?;
    info!("rowboat serve shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rowboat={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
