// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog registry and access control for the Rowboat report dispatcher.
//!
//! The catalog maps service identifiers to ordered query definitions; the
//! access resolver maps external identities to departments and answers the
//! three authorization questions the dispatcher asks. Both are immutable
//! after startup.

pub mod access;
pub mod registry;

pub use access::AccessResolver;
pub use registry::Catalog;
