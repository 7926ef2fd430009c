// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound events
//! and captured outbound deliveries for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use rowboat_core::traits::adapter::PluginAdapter;
use rowboat_core::traits::channel::{ChannelAdapter, ChannelCapabilities};
use rowboat_core::{AdapterType, ChatId, HealthStatus, Incoming, Outbound, RowboatError};

/// A mock messaging channel for testing.
///
/// Provides two queues:
/// - **inbound**: events injected via `inject()` are returned by `receive()`
/// - **delivered**: `(chat, outbound)` pairs captured by `deliver()`
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<Incoming>>>,
    delivered: Arc<Mutex<Vec<(ChatId, Outbound)>>>,
    notify: Arc<Notify>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            delivered: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Injects an inbound event into the receive queue.
    pub async fn inject(&self, event: Incoming) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// All `(chat, outbound)` pairs delivered so far.
    pub async fn delivered(&self) -> Vec<(ChatId, Outbound)> {
        self.delivered.lock().await.clone()
    }

    pub async fn delivered_count(&self) -> usize {
        self.delivered.lock().await.len()
    }

    pub async fn clear_delivered(&self) {
        self.delivered.lock().await.clear();
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, RowboatError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RowboatError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_menus: true,
            supports_documents: true,
            max_message_length: None,
        }
    }

    async fn connect(&mut self) -> Result<(), RowboatError> {
        Ok(())
    }

    async fn receive(&self) -> Result<Incoming, RowboatError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            self.notify.notified().await;
        }
    }

    async fn deliver(&self, chat: ChatId, outbound: Outbound) -> Result<(), RowboatError> {
        self.delivered.lock().await.push((chat, outbound));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowboat_core::{ChatKind, Event, UserId};

    fn text_event(text: &str) -> Incoming {
        Incoming {
            user: UserId(42),
            chat: ChatId(7),
            chat_kind: ChatKind::Private,
            chat_title: None,
            chat_topic: None,
            event: Event::Text(text.to_string()),
        }
    }

    #[tokio::test]
    async fn receive_returns_injected_events_in_order() {
        let channel = MockChannel::new();
        channel.inject(text_event("first")).await;
        channel.inject(text_event("second")).await;

        let one = channel.receive().await.unwrap();
        let two = channel.receive().await.unwrap();
        assert_eq!(one.event, Event::Text("first".into()));
        assert_eq!(two.event, Event::Text("second".into()));
    }

    #[tokio::test]
    async fn deliver_captures_outbound_actions() {
        let channel = MockChannel::new();
        channel
            .deliver(ChatId(7), Outbound::Reply("done".into()))
            .await
            .unwrap();

        let delivered = channel.delivered().await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, ChatId(7));
        assert_eq!(delivered[0].1, Outbound::Reply("done".into()));
    }

    #[tokio::test]
    async fn receive_waits_for_injection() {
        let channel = Arc::new(MockChannel::new());
        let writer = channel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
            writer.inject(text_event("delayed")).await;
        });

        let received =
            tokio::time::timeout(tokio::time::Duration::from_secs(2), channel.receive())
                .await
                .expect("receive timed out")
                .unwrap();
        assert_eq!(received.event, Event::Text("delayed".into()));
    }
}
