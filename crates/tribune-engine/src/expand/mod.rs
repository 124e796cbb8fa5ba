//! The appointment expander.
//!
//! Composes three stages in sequence: index the exceptions, unroll each
//! template, overlay and filter the generated instances. Data flows one way;
//! no stage owns state beyond the inputs it was handed.

pub mod exceptions;
pub mod filter;
pub mod overlay;
pub mod unroll;
pub mod views;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tribune_core::config::ExpansionConfig;
use tribune_core::constants::{DEFAULT_ITERATION_CAP, DEFAULT_WINDOW_DAYS};
use tribune_core::error::CoreResult;
use tribune_model::appointment::Appointment;
use tribune_model::exception::AppointmentException;
use tribune_model::instance::AppointmentInstance;

use crate::error::EngineResult;
use crate::source::{ExceptionSource, TemplateSource};
use self::exceptions::ExceptionIndex;
use self::filter::{InstanceFilter, ViewerContext, filter_instances};

/// Caller-supplied parameters of one expansion run.
///
/// `now` is an explicit parameter so the engine stays a pure function of its
/// inputs; callers pass the clock, tests pass a fixture.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionOptions {
    /// Reference instant anchoring the rolling window of unbounded
    /// recurrences.
    pub now: DateTime<Utc>,
    /// Timezone whose civil days anchor day keys and recurrence steps.
    pub timezone: Tz,
    /// Hard bound on generated instances per template.
    pub iteration_cap: u32,
    /// Rolling window, in days from `now`, for recurrences without an end
    /// date.
    pub window_days: u32,
}

impl ExpansionOptions {
    /// Options with the default guard rails, anchored at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            timezone: chrono_tz::UTC,
            iteration_cap: DEFAULT_ITERATION_CAP,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// ## Summary
    /// Options derived from loaded settings, anchored at `now`.
    ///
    /// ## Errors
    /// Returns an error if the configured timezone is unknown.
    pub fn from_settings(config: &ExpansionConfig, now: DateTime<Utc>) -> CoreResult<Self> {
        Ok(Self {
            now,
            timezone: config.timezone()?,
            iteration_cap: config.iteration_cap,
            window_days: config.window_days,
        })
    }
}

/// The appointment expander. Stateless apart from its options; every call is
/// a full, fresh recomputation over read-only snapshots.
#[derive(Debug, Clone, Copy)]
pub struct Expander {
    options: ExpansionOptions,
}

impl Expander {
    #[must_use]
    pub const fn new(options: ExpansionOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ExpansionOptions {
        &self.options
    }

    /// ## Summary
    /// Expands every template into concrete instances, sorted ascending by
    /// start instant (stable, so equal starts keep template input order).
    ///
    /// Cancelled occurrences are included and flagged; dropping them is a
    /// display decision made downstream, absence reporting needs them here.
    #[must_use]
    pub fn expand(
        &self,
        appointments: &[Appointment],
        exceptions: &[AppointmentException],
    ) -> Vec<AppointmentInstance> {
        let index = ExceptionIndex::build(exceptions);
        tracing::debug!(
            appointments = appointments.len(),
            indexed_exceptions = index.total(),
            "Expanding appointments"
        );

        let mut instances: Vec<AppointmentInstance> = appointments
            .iter()
            .flat_map(|appointment| unroll::unroll(appointment, &index, &self.options))
            .collect();
        instances.sort_by_key(|instance| instance.start);
        instances
    }

    /// ## Summary
    /// Expands and filters for one viewer: visibility check, cancellation
    /// handling, and optional type/team narrowing, order preserved.
    #[must_use]
    pub fn expand_for_viewer(
        &self,
        appointments: &[Appointment],
        exceptions: &[AppointmentException],
        viewer: &ViewerContext,
        selection: &InstanceFilter,
    ) -> Vec<AppointmentInstance> {
        filter_instances(self.expand(appointments, exceptions), viewer, selection)
    }

    /// ## Summary
    /// Expands from injected snapshot sources and filters for one viewer.
    ///
    /// ## Errors
    /// Propagates snapshot failures from either source; the expansion itself
    /// cannot fail.
    pub fn expand_from_sources<T, E>(
        &self,
        templates: &T,
        exceptions: &E,
        viewer: &ViewerContext,
        selection: &InstanceFilter,
    ) -> EngineResult<Vec<AppointmentInstance>>
    where
        T: TemplateSource + ?Sized,
        E: ExceptionSource + ?Sized,
    {
        let appointments = templates.templates()?;
        let exception_records = exceptions.exceptions()?;
        Ok(self.expand_for_viewer(&appointments, &exception_records, viewer, selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use tribune_model::appointment::Recurrence;

    fn fixture() -> (Vec<Appointment>, Vec<AppointmentException>) {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 18, 30, 0).unwrap();
        let mut training = Appointment::new("appt-1", "Training", start, "type-training");
        training.end = Some(start + TimeDelta::minutes(90));
        training.recurrence = Recurrence::Weekly;
        training.recurrence_end = Some(chrono::NaiveDate::from_ymd_opt(2025, 2, 5).expect("valid"));

        let match_start = Utc.with_ymd_and_hms(2025, 1, 8, 15, 0, 0).unwrap();
        let match_day = Appointment::new("appt-2", "Cup match", match_start, "type-match");

        let exceptions = vec![AppointmentException::cancelled(
            "appt-1",
            chrono::NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid"),
        )];
        (vec![training, match_day], exceptions)
    }

    #[test]
    fn output_is_sorted_by_start() {
        let (appointments, exceptions) = fixture();
        let expander =
            Expander::new(ExpansionOptions::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let instances = expander.expand(&appointments, &exceptions);
        assert!(instances.windows(2).all(|pair| pair[0].start <= pair[1].start));
        // The one-off afternoon match sorts before that evening's training.
        assert_eq!(instances[1].appointment_id, "appt-2");
    }

    #[test_log::test]
    fn expansion_is_deterministic() {
        let (appointments, exceptions) = fixture();
        let expander =
            Expander::new(ExpansionOptions::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let first = expander.expand(&appointments, &exceptions);
        let second = expander.expand(&appointments, &exceptions);
        assert_eq!(first, second);
    }

    #[test]
    fn sources_feed_the_same_pipeline() {
        use crate::source::InMemorySnapshot;

        let (appointments, exceptions) = fixture();
        let snapshot = InMemorySnapshot {
            templates: appointments.clone(),
            exceptions: exceptions.clone(),
        };
        let expander =
            Expander::new(ExpansionOptions::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let via_sources = expander
            .expand_from_sources(
                &snapshot,
                &snapshot,
                &ViewerContext::default(),
                &InstanceFilter::default(),
            )
            .expect("in-memory snapshot cannot fail");
        let direct = expander.expand_for_viewer(
            &appointments,
            &exceptions,
            &ViewerContext::default(),
            &InstanceFilter::default(),
        );
        assert_eq!(via_sources, direct);
    }
}
