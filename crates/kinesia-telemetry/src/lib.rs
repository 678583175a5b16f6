//! kinesia-telemetry
//!
//! The event source gateway: queries the telemetry backend for traces and
//! observations scoped to a patient, a professional, or the whole clinic,
//! and falls back to a local pre-aggregated snapshot when the backend is
//! empty or unavailable. Pure reads; nothing upstream is mutated.

pub mod client;
pub mod error;
pub mod gateway;
pub mod snapshot;

pub use client::{FetchLimits, TelemetryClient};
pub use error::{SnapshotError, TelemetryError};
pub use gateway::{DataSource, EventGateway, ScopeData, ScopeFetch};
pub use snapshot::{FsSnapshotStore, SnapshotStore};
