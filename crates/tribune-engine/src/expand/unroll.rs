//! Recurrence unrolling for a single appointment template.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use tribune_core::util::day::{add_months, local_instant, window_end};
use tribune_model::appointment::{Appointment, Recurrence};
use tribune_model::exception::ExceptionStatus;
use tribune_model::instance::{AppointmentInstance, virtual_id};

use super::exceptions::ExceptionIndex;
use super::overlay;
use super::ExpansionOptions;

/// Advance a civil day by one recurrence step.
///
/// `anchor_day` is the day-of-month of the template start; monthly steps land
/// on it again as soon as the target month is long enough.
fn step(day: NaiveDate, rule: Recurrence, anchor_day: u32) -> Option<NaiveDate> {
    match rule {
        Recurrence::Daily => day.succ_opt(),
        Recurrence::Weekly => day.checked_add_days(Days::new(7)),
        Recurrence::BiWeekly => day.checked_add_days(Days::new(14)),
        Recurrence::Monthly => add_months(day, anchor_day, 1),
        // `None` never reaches the stepping loop; an unrecognized rule stops
        // the series after its first occurrence.
        Recurrence::None | Recurrence::Unknown => None,
    }
}

/// ## Summary
/// Builds the lazy occurrence sequence for one template.
///
/// The sequence is finite (bounded by the recurrence end date or the rolling
/// window, and always by the iteration cap) and restartable: every call
/// produces a fresh iterator over the same read-only inputs.
pub fn unroll<'a>(
    appointment: &'a Appointment,
    index: &'a ExceptionIndex,
    options: &ExpansionOptions,
) -> Occurrences<'a> {
    let local_start = appointment.start.with_timezone(&options.timezone);
    let first_day = local_start.date_naive();
    let single = !appointment.is_recurring();

    let last_day = if single {
        None
    } else if let Some(end) = appointment.recurrence_end {
        Some(end)
    } else {
        // No recurrence end recorded: clamp to the rolling window so a
        // missing end date cannot unroll forever.
        Some(window_end(options.now, options.timezone, options.window_days))
    };

    Occurrences {
        appointment,
        index,
        timezone: options.timezone,
        first_day,
        start_time: local_start.time(),
        anchor_day: first_day.day(),
        duration: appointment.duration(),
        single,
        last_day,
        cursor: Some(first_day),
        remaining: options.iteration_cap,
    }
}

/// Lazy iterator over the concrete occurrences of one template.
pub struct Occurrences<'a> {
    appointment: &'a Appointment,
    index: &'a ExceptionIndex,
    timezone: Tz,
    /// Civil day of the template's own start.
    first_day: NaiveDate,
    /// Local time-of-day of the template start, reused for every occurrence.
    start_time: NaiveTime,
    /// Day-of-month the monthly rule anchors on.
    anchor_day: u32,
    /// Fixed duration shared by every occurrence.
    duration: Option<TimeDelta>,
    /// Emit exactly one occurrence, then stop.
    single: bool,
    /// Last civil day (inclusive) an occurrence may fall on.
    last_day: Option<NaiveDate>,
    /// Day the next candidate occurrence falls on.
    cursor: Option<NaiveDate>,
    /// Remaining iteration budget; running out truncates silently.
    remaining: u32,
}

impl Occurrences<'_> {
    /// Concrete start instant of the occurrence on `day`.
    ///
    /// The first occurrence reuses the template's exact start so single
    /// appointments pass through untouched; later days combine the civil day
    /// with the template's local start time.
    fn occurrence_start(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        if day == self.first_day {
            Some(self.appointment.start)
        } else {
            local_instant(day, self.start_time, self.timezone)
        }
    }

    fn materialize(&self, day: NaiveDate) -> Option<AppointmentInstance> {
        let start = self.occurrence_start(day)?;
        let appointment = self.appointment;
        let mut instance = AppointmentInstance {
            virtual_id: virtual_id(&appointment.id, day, !self.single),
            appointment_id: appointment.id.clone(),
            original_date: day,
            title: appointment.title.clone(),
            start,
            end: self.duration.map(|fixed| start + fixed),
            all_day: appointment.all_day,
            type_id: appointment.type_id.clone(),
            location_id: appointment.location_id.clone(),
            description: appointment.description.clone(),
            meeting_point: appointment.meeting_point.clone(),
            meeting_time: appointment.meeting_time,
            visibility: appointment.visibility.clone(),
            is_exception: false,
            is_cancelled: false,
        };

        if let Some(exception) = self.index.get(&appointment.id, day) {
            match exception.status {
                ExceptionStatus::Cancelled => {
                    // Still generated so absence reporting can see it;
                    // display filtering drops it downstream.
                    instance.is_cancelled = true;
                }
                ExceptionStatus::Modified => {
                    overlay::apply_overrides(&mut instance, &exception.overrides, self.duration);
                    instance.is_exception = true;
                }
            }
        }

        Some(instance)
    }
}

impl Iterator for Occurrences<'_> {
    type Item = AppointmentInstance;

    fn next(&mut self) -> Option<AppointmentInstance> {
        loop {
            let day = self.cursor?;

            if self.remaining == 0 {
                tracing::trace!(
                    appointment_id = %self.appointment.id,
                    "Iteration cap reached, truncating series"
                );
                self.cursor = None;
                return None;
            }
            if self.last_day.is_some_and(|last| day > last) {
                self.cursor = None;
                return None;
            }

            self.remaining -= 1;
            self.cursor = if self.single {
                None
            } else {
                step(day, self.appointment.recurrence, self.anchor_day)
            };

            if let Some(instance) = self.materialize(day) {
                return Some(instance);
            }
            // The local time fell into a DST gap; skip the occurrence.
        }
    }
}


#[cfg(test)]
mod expand_cases {
    use crate::expand::{Expander, ExpansionOptions};

    include!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/expand_cases_data/mod.rs"
    ));

    #[test]
    fn expand_cases_unit() {
        for case in expand_cases() {
            let expander = Expander::new(ExpansionOptions {
                now: case.now(),
                timezone: chrono_tz::UTC,
                iteration_cap: case.cap,
                window_days: case.window_days,
            });
            let instances = expander.expand(&[case.appointment()], &[]);
            assert_days(&case, &instances);
        }
    }
}
