// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user selection state.
//!
//! Ephemeral by design: the map lives in memory only, so a restart returns
//! every user to `Idle` and the next `/start` rebuilds the menu.

use dashmap::DashMap;

use rowboat_core::UserId;

/// Where a user is in the two-step service/query selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// `/start` was issued; the next text may pick a service by name.
    ServiceChosen,
}

/// Concurrent per-user state map. Absent entry means `Idle`.
#[derive(Default)]
pub struct SessionMap {
    states: DashMap<UserId, SelectionState>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, user: UserId) -> SelectionState {
        self.states
            .get(&user)
            .map(|entry| *entry)
            .unwrap_or_default()
    }

    pub fn set(&self, user: UserId, state: SelectionState) {
        self.states.insert(user, state);
    }

    /// Returns the user to `Idle`, dropping the entry.
    pub fn reset(&self, user: UserId) {
        self.states.remove(&user);
    }
}
