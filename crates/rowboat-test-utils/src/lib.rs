// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared mock adapters for Rowboat tests.
//!
//! Every mock implements the same adapter traits production code depends on,
//! with injectable results and captured calls for assertion.

pub mod mock_activity;
pub mod mock_channel;
pub mod mock_store;

pub use mock_activity::MockActivityStore;
pub use mock_channel::MockChannel;
pub use mock_store::MockDataStore;
