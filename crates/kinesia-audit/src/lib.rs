//! kinesia-audit
//!
//! The derivation core: reduces an unordered stream of clinical telemetry
//! events into one summary per visit, then classifies completeness risk
//! from the summary. Every pass is a pure function of its inputs.

pub mod aggregate;
pub mod classify;
pub mod events;

pub use aggregate::{Aggregator, ReviewReduction};
pub use classify::{classify, classify_all, escalate_for_patient, ClassifierMode};
pub use events::PassEvent;
