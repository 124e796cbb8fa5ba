//! Derived calendar instances produced by the expander.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tribune_core::constants::VIRTUAL_ID_SEPARATOR;
use tribune_core::util::day::iso_day;

use crate::appointment::Visibility;

/// Build the virtual id for an occurrence of `appointment_id` on `day`.
///
/// Non-recurring appointments keep their template id; recurring occurrences
/// get the ISO day appended so every occurrence has a stable, distinct id.
#[must_use]
pub fn virtual_id(appointment_id: &str, day: NaiveDate, recurring: bool) -> String {
    if recurring {
        format!("{appointment_id}{VIRTUAL_ID_SEPARATOR}{}", iso_day(day))
    } else {
        appointment_id.to_string()
    }
}

/// One concrete occurrence of an appointment, ready for display.
///
/// Rebuilt from templates and exceptions on every expansion call, never
/// persisted; owned solely by the caller that requested it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInstance {
    /// Stable synthetic id, see [`virtual_id`].
    pub virtual_id: String,
    /// Template this instance was generated from.
    pub appointment_id: String,
    /// Civil day the occurrence was generated for, before any overlay.
    pub original_date: NaiveDate,
    pub title: String,
    /// Concrete start instant, after any overlay.
    pub start: DateTime<Utc>,
    /// Concrete end instant, after any overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<DateTime<Utc>>,
    pub visibility: Visibility,
    /// Whether a `modified` exception was overlaid onto this occurrence.
    pub is_exception: bool,
    /// Whether a `cancelled` exception voids this occurrence. Cancelled
    /// instances are still generated so absence reporting can see them.
    pub is_cancelled: bool,
}

impl AppointmentInstance {
    /// Join key used by the RSVP/statistics consumers:
    /// `(appointment id, original civil day)`.
    #[must_use]
    pub fn occurrence_key(&self) -> (&str, NaiveDate) {
        (&self.appointment_id, self.original_date)
    }
}
