// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch for the Rowboat report bot.
//!
//! Ties the catalog, access control, gateway, and export pipeline together:
//! one parsed inbound event goes in, ordered outbound actions come out.
//! Selection state and activity aggregation live here as well.

pub mod activity;
pub mod dispatcher;
pub mod session;

pub use activity::{ActivityRecord, ActivityTracker, UserSummary};
pub use dispatcher::Dispatcher;
pub use session::{SelectionState, SessionMap};
