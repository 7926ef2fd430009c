// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tagged inbound event and outbound action model.
//!
//! Raw transport strings (commands, callback payloads) are parsed exactly
//! once at the channel boundary into these variants; the dispatcher and the
//! state machine never re-parse strings internally.

use crate::types::{ChatId, ChatKind, UserId};

/// A parsed inbound event together with its origin.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub user: UserId,
    pub chat: ChatId,
    pub chat_kind: ChatKind,
    /// Last seen chat title (group chats), best-effort.
    pub chat_title: Option<String>,
    /// Last seen topic; the transport may not expose one.
    pub chat_topic: Option<String>,
    pub event: Event,
}

/// What the operator did.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `/start` -- present the authorized service menu.
    Start,
    /// `/my_stats` -- the caller's own activity summary.
    MyStats,
    /// `/all_stats` -- every tracked user's summary (admin only).
    AllStats,
    /// Free text. Always observed by the activity aggregator; interpreted as
    /// a service pick only while the caller's session is `ServiceChosen`.
    Text(String),
    /// An inline keyboard button press.
    Button(CallbackAction),
}

/// A parsed callback payload.
///
/// The wire format splits on the first colon only: `service:<serviceId>`
/// browses a service, `<serviceId>:<queryKey>` dispatches a query. Service
/// ids and query keys therefore must never contain a colon (enforced at
/// config validation).
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    ServiceSelected(String),
    QuerySelected { service: String, key: String },
    Unrecognized(String),
}

/// Parses a raw callback payload. The sole parsing rule for button data.
pub fn parse_callback(payload: &str) -> CallbackAction {
    match payload.split_once(':') {
        Some(("service", id)) if !id.is_empty() => CallbackAction::ServiceSelected(id.to_string()),
        Some((service, key)) if !service.is_empty() && !key.is_empty() => {
            CallbackAction::QuerySelected {
                service: service.to_string(),
                key: key.to_string(),
            }
        }
        _ => CallbackAction::Unrecognized(payload.to_string()),
    }
}

/// One inline keyboard button: display label plus callback payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuButton {
    pub label: String,
    pub payload: String,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// An outbound effect produced by the dispatcher for the transport to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Plain text reply.
    Reply(String),
    /// Text with an inline keyboard, one button per row.
    Menu {
        text: String,
        buttons: Vec<MenuButton>,
    },
    /// File delivery.
    Document {
        filename: String,
        bytes: Vec<u8>,
        caption: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_prefix_parses_to_browse() {
        assert_eq!(
            parse_callback("service:marketing"),
            CallbackAction::ServiceSelected("marketing".into())
        );
    }

    #[test]
    fn plain_pair_parses_to_query_dispatch() {
        assert_eq!(
            parse_callback("marketing:export_users"),
            CallbackAction::QuerySelected {
                service: "marketing".into(),
                key: "export_users".into(),
            }
        );
    }

    #[test]
    fn split_happens_on_first_colon_only() {
        // A key is never allowed to contain a colon, but the parser must not
        // panic on hostile payloads; everything after the first colon is the key.
        assert_eq!(
            parse_callback("a:b:c"),
            CallbackAction::QuerySelected {
                service: "a".into(),
                key: "b:c".into(),
            }
        );
    }

    #[test]
    fn degenerate_payloads_are_unrecognized() {
        for payload in ["", "no_colon", ":key", "service:", "svc:"] {
            assert_eq!(
                parse_callback(payload),
                CallbackAction::Unrecognized(payload.into()),
                "payload {payload:?}"
            );
        }
    }
}
