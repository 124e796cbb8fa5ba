use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use tribune_model::appointment::{Appointment, Recurrence};
use tribune_model::instance::AppointmentInstance;

pub struct ExpandCase {
    pub name: &'static str,
    pub recurrence: Recurrence,
    /// Template start, RFC 3339.
    pub start: &'static str,
    /// Duration in minutes; `None` leaves the template open-ended.
    pub duration_minutes: Option<i64>,
    /// Inclusive recurrence end day, ISO.
    pub recurrence_end: Option<&'static str>,
    /// Reference instant for the rolling window, RFC 3339.
    pub now: &'static str,
    pub expected_days: Option<&'static [&'static str]>,
    pub expected_len: Option<usize>,
    pub cap: u32,
    pub window_days: u32,
}

impl ExpandCase {
    pub fn now(&self) -> DateTime<Utc> {
        parse_instant(self.now)
    }

    pub fn appointment(&self) -> Appointment {
        let start = parse_instant(self.start);
        let mut appointment = Appointment::new("case-appt", self.name, start, "type-case");
        appointment.end = self
            .duration_minutes
            .map(|minutes| start + TimeDelta::minutes(minutes));
        appointment.recurrence = self.recurrence;
        appointment.recurrence_end = self.recurrence_end.map(parse_day);
        appointment
    }
}

#[expect(clippy::too_many_lines)]
pub fn expand_cases() -> Vec<ExpandCase> {
    vec![
        ExpandCase {
            name: "single_basic",
            recurrence: Recurrence::None,
            start: "2025-01-01T18:30:00Z",
            duration_minutes: Some(90),
            recurrence_end: None,
            now: "2025-01-01T00:00:00Z",
            expected_days: Some(&["2025-01-01"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "daily_basic",
            recurrence: Recurrence::Daily,
            start: "2025-02-01T09:30:00Z",
            duration_minutes: Some(60),
            recurrence_end: Some("2025-02-03"),
            now: "2025-02-01T00:00:00Z",
            expected_days: Some(&["2025-02-01", "2025-02-02", "2025-02-03"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "weekly_inclusive_end",
            recurrence: Recurrence::Weekly,
            start: "2025-01-01T18:30:00Z",
            duration_minutes: Some(90),
            recurrence_end: Some("2025-01-22"),
            now: "2025-01-01T00:00:00Z",
            expected_days: Some(&["2025-01-01", "2025-01-08", "2025-01-15", "2025-01-22"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "bi_weekly_basic",
            recurrence: Recurrence::BiWeekly,
            start: "2025-01-04T10:00:00Z",
            duration_minutes: Some(45),
            recurrence_end: Some("2025-02-01"),
            now: "2025-01-01T00:00:00Z",
            expected_days: Some(&["2025-01-04", "2025-01-18", "2025-02-01"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "monthly_clamps_to_short_months",
            recurrence: Recurrence::Monthly,
            start: "2025-01-31T10:00:00Z",
            duration_minutes: Some(120),
            recurrence_end: Some("2025-04-30"),
            now: "2025-01-01T00:00:00Z",
            expected_days: Some(&["2025-01-31", "2025-02-28", "2025-03-31", "2025-04-30"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "monthly_leap_february",
            recurrence: Recurrence::Monthly,
            start: "2024-01-31T10:00:00Z",
            duration_minutes: None,
            recurrence_end: Some("2024-03-31"),
            now: "2024-01-01T00:00:00Z",
            expected_days: Some(&["2024-01-31", "2024-02-29", "2024-03-31"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "monthly_wraps_year_end",
            recurrence: Recurrence::Monthly,
            start: "2024-11-30T10:00:00Z",
            duration_minutes: None,
            recurrence_end: Some("2025-01-31"),
            now: "2024-11-01T00:00:00Z",
            expected_days: Some(&["2024-11-30", "2024-12-30", "2025-01-30"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "unknown_rule_single_occurrence",
            recurrence: Recurrence::Unknown,
            start: "2025-01-01T18:30:00Z",
            duration_minutes: Some(90),
            recurrence_end: Some("2025-12-31"),
            now: "2025-01-01T00:00:00Z",
            expected_days: Some(&["2025-01-01"]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "start_past_recurrence_end",
            recurrence: Recurrence::Weekly,
            start: "2025-06-01T18:30:00Z",
            duration_minutes: Some(90),
            recurrence_end: Some("2025-05-01"),
            now: "2025-01-01T00:00:00Z",
            expected_days: Some(&[]),
            expected_len: None,
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "daily_unbounded_stays_inside_window",
            recurrence: Recurrence::Daily,
            start: "2025-01-01T09:00:00Z",
            duration_minutes: Some(60),
            recurrence_end: None,
            now: "2025-01-01T00:00:00Z",
            expected_days: None,
            expected_len: Some(365),
            cap: 500,
            window_days: 365,
        },
        ExpandCase {
            name: "cap_truncates_runaway_series",
            recurrence: Recurrence::Daily,
            start: "2025-01-01T09:00:00Z",
            duration_minutes: Some(60),
            recurrence_end: Some("2035-01-01"),
            now: "2025-01-01T00:00:00Z",
            expected_days: None,
            expected_len: Some(25),
            cap: 25,
            window_days: 365,
        },
    ]
}

pub fn assert_days(case: &ExpandCase, instances: &[AppointmentInstance]) {
    if let Some(expected) = case.expected_days {
        let expected_days: Vec<NaiveDate> = expected.iter().map(|value| parse_day(value)).collect();
        let actual_days: Vec<NaiveDate> = instances
            .iter()
            .map(|instance| instance.original_date)
            .collect();
        assert_eq!(actual_days, expected_days, "Case {} did not match", case.name);
    }

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            instances.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}

fn parse_instant(value: &str) -> DateTime<Utc> {
    let parsed: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|err| panic!("Failed to parse rfc3339 value {value}: {err}"));
    parsed.with_timezone(&Utc)
}

fn parse_day(value: &str) -> NaiveDate {
    value
        .parse()
        .unwrap_or_else(|err| panic!("Failed to parse ISO day {value}: {err}"))
}
