//! avatargram - Telegram avatar wizard bot
//!
//! Walks each chat through a fixed wizard (style, format, background,
//! optional color, seed), fetches the configured avatar from a
//! DiceBear-compatible API, and delivers it back into the chat.

mod avatar;
mod catalog;
mod colors;
mod config;
mod runtime;
mod state_machine;
mod telegram;

use avatar::DicebearClient;
use catalog::CommandCatalog;
use config::BotConfig;
use runtime::WizardEngine;
use state_machine::WizardContext;
use std::time::Duration;
use telegram::TelegramClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Long-poll timeout passed to `getUpdates`.
const POLL_TIMEOUT_SECS: u64 = 50;

/// Backoff after a failed poll before trying again.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatargram=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = BotConfig::from_env()?;
    let catalog = CommandCatalog::new(config.commands.clone());
    tracing::info!(
        styles = catalog.len(),
        avatar_api = %config.avatar_api_base,
        "Starting avatargram"
    );

    let telegram = TelegramClient::new(&config.bot_token, &config.telegram_api_base);
    let fetcher = DicebearClient::new(&config.avatar_api_base);
    let cancel = CancellationToken::new();
    let engine = WizardEngine::new(
        WizardContext::new(catalog),
        telegram.clone(),
        fetcher,
        cancel.clone(),
    );

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    let mut offset = 0i64;
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            polled = telegram.get_updates(offset, POLL_TIMEOUT_SECS) => match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        if let Some((chat, event)) = telegram::inbound_event(update) {
                            engine.handle(chat, event).await;
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "Polling failed, backing off");
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(POLL_RETRY_DELAY) => {}
                    }
                }
            },
        }
    }

    tracing::info!("avatargram stopped");
    Ok(())
}
