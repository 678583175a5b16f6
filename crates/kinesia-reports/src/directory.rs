use kinesia_core::models::{Patient, Professional};

use crate::error::DirectoryError;

/// Read-only name resolution against the clinic directory. The engine
/// only reads names and risk factors; a lookup failure degrades to
/// placeholder identities, it never drops a visit.
pub trait DirectoryLookup {
    fn list_professionals(
        &self,
    ) -> impl Future<Output = Result<Vec<Professional>, DirectoryError>>;

    fn list_patients(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<Patient>, DirectoryError>>;
}
