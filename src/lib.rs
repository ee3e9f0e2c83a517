//! # enroll-analytics
//!
//! Org-scoped registration and revenue analytics API for the Enroll
//! event-management platform.
//!
//! This crate answers one question for an organization's staff: how are
//! registrations and revenue accumulating relative to an event's start
//! date, and how are registrant-supplied custom answers distributed?
//! All aggregation happens in the in-crate analytics engine over an
//! immutable dataset snapshot — the service performs no per-request
//! database work.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── AnalyticsService (service/)
//!     ├── Analytics Engine (analytics/)
//!     ├── Boundary Codecs (auth/)
//!     │
//!     ├── SnapshotStore (domain/)
//!     │
//!     └── MySQL Record Source (persistence/)
//! ```

pub mod analytics;
pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
