// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for the messaging transport (Telegram, mocks).

use async_trait::async_trait;

use crate::error::RowboatError;
use crate::event::{Incoming, Outbound};
use crate::traits::adapter::PluginAdapter;
use crate::types::ChatId;

/// Capabilities reported by a channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    pub supports_menus: bool,
    pub supports_documents: bool,
    pub max_message_length: Option<usize>,
}

/// Adapter for a bidirectional messaging transport.
///
/// The channel parses raw updates into [`Incoming`] events (the single
/// parsing step at the transport boundary) and renders [`Outbound`] actions
/// back into platform calls.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Returns the capabilities supported by this channel.
    fn capabilities(&self) -> ChannelCapabilities;

    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), RowboatError>;

    /// Receives the next inbound event from the channel.
    async fn receive(&self) -> Result<Incoming, RowboatError>;

    /// Renders an outbound action into the given chat.
    async fn deliver(&self, chat: ChatId, outbound: Outbound) -> Result<(), RowboatError>;
}
