pub mod directory;
pub mod observation;
pub mod risk;
pub mod trace;
pub mod visit;

pub use directory::{Patient, Professional};
pub use observation::{Observation, ObservationKind};
pub use risk::{
    AuditedVisit, OmissionAxis, RiskLevel, RiskVisit, ValidationStatus, Validations,
};
pub use trace::Trace;
pub use visit::{VisitEvent, VisitSummary};
