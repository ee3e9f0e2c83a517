//! Type-safe organization and event identifiers.
//!
//! Both wrap the platform's integer primary keys. [`EventId`] values are
//! never exposed raw — the API boundary translates them through the
//! opaque codec in [`crate::auth::event_code`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tenant boundary identifier. Every query is implicitly scoped to one
/// organization; data from other organizations is never visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(i64);

impl OrgId {
    /// Sentinel value resolved from an undecipherable org token. Scopes
    /// to no rows: listing yields nothing, event lookups are not found.
    pub const EMPTY: Self = Self(0);

    /// Wraps a raw organization key.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Returns `true` for the sentinel produced by a failed token
    /// resolution.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal canonical event identifier.
///
/// Used as the key for all snapshot lookups. Obfuscated into an opaque
/// string at the API boundary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw event key.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
