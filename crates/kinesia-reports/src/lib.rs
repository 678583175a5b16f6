//! kinesia-reports
//!
//! Scope filtering, grouping, and the engine facade the presentation layer
//! calls. A pass is triggered synchronously by a scope or filter change,
//! runs to completion, and publishes a value; nothing runs in the
//! background.

pub mod directory;
pub mod engine;
pub mod error;
pub mod filter;
pub mod generation;
pub mod group;
pub mod period;

pub use directory::DirectoryLookup;
pub use engine::{AuditEngine, PatientHistory, RiskReport};
pub use error::{DirectoryError, ReportError};
pub use filter::{apply_filters, RiskFilters};
pub use generation::{Generation, PassToken};
pub use group::{group_by_professional, group_by_year, ProfessionalGroup, YearGroup};
pub use period::TimePeriod;
