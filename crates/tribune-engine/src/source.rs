//! Read-only snapshot providers for templates and exceptions.
//!
//! The engine never talks to storage. Callers hand it snapshot sources that
//! the surrounding application fills from its document store; the engine
//! treats every snapshot as an immutable, already-fetched collection.

use tribune_model::appointment::Appointment;
use tribune_model::exception::AppointmentException;

use crate::error::EngineResult;

/// Read-only provider of appointment templates.
pub trait TemplateSource {
    /// ## Summary
    /// Returns a snapshot of all appointment templates.
    ///
    /// ## Errors
    /// Returns an error if the snapshot cannot be produced.
    fn templates(&self) -> EngineResult<Vec<Appointment>>;
}

/// Read-only provider of appointment exceptions.
pub trait ExceptionSource {
    /// ## Summary
    /// Returns a snapshot of all appointment exceptions.
    ///
    /// ## Errors
    /// Returns an error if the snapshot cannot be produced.
    fn exceptions(&self) -> EngineResult<Vec<AppointmentException>>;
}

/// In-memory snapshot, used by tests and by callers that already fetched
/// their collections.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    pub templates: Vec<Appointment>,
    pub exceptions: Vec<AppointmentException>,
}

impl TemplateSource for InMemorySnapshot {
    fn templates(&self) -> EngineResult<Vec<Appointment>> {
        Ok(self.templates.clone())
    }
}

impl ExceptionSource for InMemorySnapshot {
    fn exceptions(&self) -> EngineResult<Vec<AppointmentException>> {
        Ok(self.exceptions.clone())
    }
}
