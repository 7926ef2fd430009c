// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update parsing: raw Telegram messages into tagged [`Incoming`] events.
//!
//! This is the single place where transport strings are interpreted.
//! Commands tolerate the `@botname` suffix Telegram appends in groups.
//! Non-text messages (stickers, dice, media) become empty text so the
//! activity aggregator still counts them with length zero.

use teloxide::prelude::*;
use teloxide::types::{ChatKind as TgChatKind, MaybeInaccessibleMessage};

use rowboat_core::{parse_callback, ChatId, ChatKind, Event, Incoming, UserId};

/// Parses one Telegram message. Returns `None` for sender-less posts
/// (channel broadcasts), which the bot never answers or counts.
pub fn parse_message(msg: &Message) -> Option<Incoming> {
    let from = msg.from.as_ref()?;

    let event = match msg.text() {
        Some(text) => parse_text(text),
        None => Event::Text(String::new()),
    };

    Some(Incoming {
        user: UserId(from.id.0 as i64),
        chat: ChatId(msg.chat.id.0),
        chat_kind: kind_of(&msg.chat.kind),
        chat_title: msg.chat.title().map(str::to_string),
        // Telegram exposes forum topic ids, not names; the durable table
        // stores NULL until a name is observable.
        chat_topic: None,
        event,
    })
}

/// Parses one callback query. Returns `None` when the originating message is
/// inaccessible (too old), since there is no chat to answer into.
pub fn parse_callback_query(query: &CallbackQuery) -> Option<Incoming> {
    let data = query.data.as_deref()?;
    let message = match query.message.as_ref()? {
        MaybeInaccessibleMessage::Regular(msg) => msg,
        MaybeInaccessibleMessage::Inaccessible(_) => return None,
    };

    Some(Incoming {
        user: UserId(query.from.id.0 as i64),
        chat: ChatId(message.chat.id.0),
        chat_kind: kind_of(&message.chat.kind),
        chat_title: message.chat.title().map(str::to_string),
        chat_topic: None,
        event: Event::Button(parse_callback(data)),
    })
}

/// Maps message text to its event. Unknown commands stay plain text so they
/// are tracked like any other message.
pub fn parse_text(text: &str) -> Event {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('/') {
        let word = rest.split_whitespace().next().unwrap_or("");
        let command = word.split('@').next().unwrap_or("");
        match command {
            "start" => return Event::Start,
            "my_stats" => return Event::MyStats,
            "all_stats" => return Event::AllStats,
            _ => {}
        }
    }
    Event::Text(text.to_string())
}

fn kind_of(kind: &TgChatKind) -> ChatKind {
    match kind {
        TgChatKind::Private(_) => ChatKind::Private,
        _ => ChatKind::Group,
    }
}
