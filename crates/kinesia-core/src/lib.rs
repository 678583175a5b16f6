//! kinesia-core
//!
//! Pure domain types for the clinical audit and risk aggregation engine.
//! No backend dependency — this is the shared vocabulary of the Kinesia
//! system; everything here is recomputed per pass and owns no state.

pub mod error;
pub mod models;
pub mod scope;
