//! Index of exceptions keyed by template and civil day.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveDate;
use tribune_model::exception::AppointmentException;

/// Lookup of exceptions by `(appointment id, civil day)`.
///
/// At most one exception per occurrence is meaningful; [`ExceptionIndex::build`]
/// picks the winner deterministically.
#[derive(Debug, Default)]
pub struct ExceptionIndex {
    by_appointment: HashMap<String, HashMap<NaiveDate, AppointmentException>>,
    total: usize,
}

impl ExceptionIndex {
    /// ## Summary
    /// Builds the index from raw exception records.
    ///
    /// Records without an `original_date` are skipped. When several records
    /// target the same occurrence, the most recently created one wins; equal
    /// creation timestamps fall back to input order, last wins.
    #[must_use]
    pub fn build(exceptions: &[AppointmentException]) -> Self {
        let mut index = Self::default();
        for exception in exceptions {
            let Some(day) = exception.original_date else {
                tracing::trace!(
                    exception_id = %exception.id,
                    "Skipping exception without original date"
                );
                continue;
            };

            let days = index
                .by_appointment
                .entry(exception.appointment_id.clone())
                .or_default();
            match days.entry(day) {
                Entry::Vacant(slot) => {
                    slot.insert(exception.clone());
                    index.total += 1;
                }
                Entry::Occupied(mut slot) => {
                    if exception.created_at >= slot.get().created_at {
                        slot.insert(exception.clone());
                    }
                }
            }
        }
        index
    }

    /// Exception overriding the occurrence of `appointment_id` on `day`.
    #[must_use]
    pub fn get(&self, appointment_id: &str, day: NaiveDate) -> Option<&AppointmentException> {
        self.by_appointment.get(appointment_id)?.get(&day)
    }

    /// Number of distinct occurrences with an exception.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
