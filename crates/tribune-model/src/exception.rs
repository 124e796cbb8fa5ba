//! Models for per-day appointment exceptions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an exception affects its occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExceptionStatus {
    Cancelled,
    Modified,
}

/// Override for a single field of a single occurrence.
///
/// `Keep` leaves the template value untouched, `Set` replaces it, and `Clear`
/// removes an optional value. An admin clearing the meeting point is a
/// different record than one that never touched it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "action", content = "value")]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Set(T),
    Clear,
}

impl<T> FieldPatch<T> {
    /// Apply the patch on top of an optional template value.
    #[must_use]
    pub fn apply(self, base: Option<T>) -> Option<T> {
        match self {
            Self::Keep => base,
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }

    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Field overlay payload of a `modified` exception.
///
/// Only fields present in the payload replace the template's value for the
/// affected occurrence; everything else keeps the template default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccurrenceOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub location_id: FieldPatch<String>,
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub description: FieldPatch<String>,
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub meeting_point: FieldPatch<String>,
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub meeting_time: FieldPatch<DateTime<Utc>>,
}

impl OccurrenceOverride {
    /// Whether the payload overrides anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.all_day.is_none()
            && self.location_id.is_keep()
            && self.description.is_keep()
            && self.meeting_point.is_keep()
            && self.meeting_time.is_keep()
    }
}

/// A per-day override for one appointment template.
///
/// Written when an administrator edits or cancels a single occurrence of a
/// series. The expander never deletes these; truncating or splitting a series
/// cleans them up in the surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentException {
    /// Document id assigned by the store.
    pub id: String,
    /// Template this exception overrides.
    #[serde(rename = "originalAppointmentId")]
    pub appointment_id: String,
    /// Civil day of the occurrence it overrides. Legacy records written
    /// without a day are ignored by the expander.
    #[serde(rename = "originalDate", skip_serializing_if = "Option::is_none")]
    pub original_date: Option<NaiveDate>,
    pub status: ExceptionStatus,
    /// Field overlay, meaningful only when `status` is `Modified`.
    #[serde(default, skip_serializing_if = "OccurrenceOverride::is_empty")]
    pub overrides: OccurrenceOverride,
    /// Creation timestamp; the most recent record wins when several target
    /// the same occurrence.
    pub created_at: DateTime<Utc>,
}

impl AppointmentException {
    /// Cancel the occurrence of `appointment_id` on `day`.
    #[must_use]
    pub fn cancelled(appointment_id: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            appointment_id: appointment_id.into(),
            original_date: Some(day),
            status: ExceptionStatus::Cancelled,
            overrides: OccurrenceOverride::default(),
            created_at: Utc::now(),
        }
    }

    /// Modify the occurrence of `appointment_id` on `day`.
    #[must_use]
    pub fn modified(
        appointment_id: impl Into<String>,
        day: NaiveDate,
        overrides: OccurrenceOverride,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            appointment_id: appointment_id.into(),
            original_date: Some(day),
            status: ExceptionStatus::Modified,
            overrides,
            created_at: Utc::now(),
        }
    }
}
