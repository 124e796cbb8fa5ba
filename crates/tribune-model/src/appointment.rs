//! Models for appointment templates.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Recurrence rule of an appointment template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    /// Rule string written by a newer client that this build does not know.
    /// The expander treats it as a single occurrence.
    Unknown,
}

impl Recurrence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a stored rule string. Unrecognized values map to `Unknown`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "none" => Self::None,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "bi-weekly" => Self::BiWeekly,
            "monthly" => Self::Monthly,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Recurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Who can see instances of an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Visibility {
    /// Visible to every member.
    All,
    /// Visible only to members of at least one of the listed teams.
    #[serde(rename_all = "camelCase")]
    SpecificTeams { team_ids: BTreeSet<String> },
}

impl Default for Visibility {
    fn default() -> Self {
        Self::All
    }
}

impl Visibility {
    /// Whether a viewer with the given team memberships may see the
    /// appointment.
    #[must_use]
    pub fn permits(&self, viewer_teams: &BTreeSet<String>) -> bool {
        match self {
            Self::All => true,
            Self::SpecificTeams { team_ids } => {
                team_ids.iter().any(|team| viewer_teams.contains(team))
            }
        }
    }
}

/// An authored appointment template, possibly recurring.
///
/// Created and edited by administrators through the surrounding application;
/// the expander only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Document id assigned by the store.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Start instant in UTC.
    pub start: DateTime<Utc>,
    /// End instant in UTC. Absent for open-ended appointments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Whether the appointment covers the whole day.
    #[serde(default)]
    pub all_day: bool,
    /// Recurrence rule.
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Last civil day (inclusive) on which a recurring appointment may occur.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_end: Option<NaiveDate>,
    /// Appointment type (training, match day, ...).
    pub type_id: String,
    /// Location document id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text meeting point announced to participants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
    /// Meeting instant ahead of the start, e.g. for away games.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visibility: Visibility,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// A single (non-recurring) appointment with the given core fields; the
    /// remaining fields start out empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        type_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end: None,
            all_day: false,
            recurrence: Recurrence::None,
            recurrence_end: None,
            type_id: type_id.into(),
            location_id: None,
            description: None,
            meeting_point: None,
            meeting_time: None,
            visibility: Visibility::All,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fixed duration shared by every generated instance, if an end is set.
    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        self.end.map(|end| end.signed_duration_since(self.start))
    }

    /// Whether the template follows the recurring code path. `Unknown` rules
    /// do, they just stop after their first occurrence.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        !matches!(self.recurrence, Recurrence::None)
    }
}
