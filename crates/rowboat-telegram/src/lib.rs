// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Rowboat report dispatcher.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide:
//! long polling for messages and callback queries, inline-keyboard menu
//! rendering, and in-memory document upload.

pub mod parse;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId as TgChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, Recipient,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use rowboat_config::model::TelegramConfig;
use rowboat_core::traits::adapter::PluginAdapter;
use rowboat_core::traits::channel::{ChannelAdapter, ChannelCapabilities};
use rowboat_core::{AdapterType, ChatId, HealthStatus, Incoming, Outbound, RowboatError};

/// Telegram channel adapter implementing [`ChannelAdapter`].
///
/// Connects via long polling; every accepted update is parsed exactly once
/// in [`parse`] and forwarded through an in-process queue to `receive()`.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<Incoming>>,
    inbound_tx: mpsc::Sender<Incoming>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Requires `config.bot_token` to be set and non-empty.
    pub fn new(config: &TelegramConfig) -> Result<Self, RowboatError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            RowboatError::Config("telegram.bot_token is required for the Telegram adapter".into())
        })?;
        if token.is_empty() {
            return Err(RowboatError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, RowboatError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), RowboatError> {
        debug!("Telegram channel shutting down");
        // The polling handle is aborted on drop. For graceful shutdown the
        // serve loop stops calling receive() first.
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_menus: true,
            supports_documents: true,
            max_message_length: Some(4096),
        }
    }

    async fn connect(&mut self) -> Result<(), RowboatError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let bot = self.bot.clone();
        let message_tx = self.inbound_tx.clone();
        let callback_tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = dptree::entry()
                .branch(Update::filter_message().endpoint(move |msg: Message| {
                    let tx = message_tx.clone();
                    async move {
                        match parse::parse_message(&msg) {
                            Some(incoming) => {
                                if tx.send(incoming).await.is_err() {
                                    warn!("inbound queue closed, dropping message");
                                }
                            }
                            None => {
                                debug!(chat_id = msg.chat.id.0, "ignoring sender-less message");
                            }
                        }
                        respond(())
                    }
                }))
                .branch(Update::filter_callback_query().endpoint(
                    move |bot: Bot, query: CallbackQuery| {
                        let tx = callback_tx.clone();
                        async move {
                            // Stop the client-side spinner regardless of outcome.
                            if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
                                warn!(error = %e, "failed to answer callback query");
                            }
                            match parse::parse_callback_query(&query) {
                                Some(incoming) => {
                                    if tx.send(incoming).await.is_err() {
                                        warn!("inbound queue closed, dropping callback");
                                    }
                                }
                                None => {
                                    debug!("ignoring callback without data or reachable chat");
                                }
                            }
                            respond(())
                        }
                    },
                ));

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {}) // Silently ignore other update kinds
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn receive(&self) -> Result<Incoming, RowboatError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| RowboatError::Delivery {
            message: "Telegram inbound queue closed".into(),
            source: None,
        })
    }

    async fn deliver(&self, chat: ChatId, outbound: Outbound) -> Result<(), RowboatError> {
        let recipient = Recipient::Id(TgChatId(chat.0));
        match outbound {
            Outbound::Reply(text) => {
                self.bot
                    .send_message(recipient, text)
                    .await
                    .map_err(|e| delivery_err("failed to send message", e))?;
            }
            Outbound::Menu { text, buttons } => {
                // One button per row, preserving catalog declaration order.
                let keyboard = InlineKeyboardMarkup::new(
                    buttons
                        .into_iter()
                        .map(|b| vec![InlineKeyboardButton::callback(b.label, b.payload)]),
                );
                self.bot
                    .send_message(recipient, text)
                    .reply_markup(keyboard)
                    .await
                    .map_err(|e| delivery_err("failed to send menu", e))?;
            }
            Outbound::Document {
                filename,
                bytes,
                caption,
            } => {
                let file = InputFile::memory(bytes).file_name(filename);
                self.bot
                    .send_document(recipient, file)
                    .caption(caption)
                    .await
                    .map_err(|e| delivery_err("failed to send document", e))?;
            }
        }
        Ok(())
    }
}

fn delivery_err(message: &str, err: teloxide::RequestError) -> RowboatError {
    RowboatError::Delivery {
        message: format!("{message}: {err}"),
        source: Some(Box::new(err)),
    }
}
