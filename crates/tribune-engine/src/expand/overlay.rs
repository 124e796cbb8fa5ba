//! Field overlay of `modified` exceptions onto generated instances.

use chrono::TimeDelta;
use tribune_model::exception::OccurrenceOverride;
use tribune_model::instance::AppointmentInstance;

/// ## Summary
/// Overlays an exception's partial field set onto a freshly generated
/// instance.
///
/// Only fields present in the payload replace template values; everything
/// else keeps the value the unroller computed for that day. The template's
/// duration is preserved when only the start is overridden; a payload that
/// sets the end takes it as given.
pub fn apply_overrides(
    instance: &mut AppointmentInstance,
    overrides: &OccurrenceOverride,
    duration: Option<TimeDelta>,
) {
    if let Some(title) = &overrides.title {
        instance.title = title.clone();
    }
    if let Some(all_day) = overrides.all_day {
        instance.all_day = all_day;
    }

    match (overrides.start, overrides.end) {
        (Some(start), Some(end)) => {
            instance.start = start;
            instance.end = Some(end);
        }
        (Some(start), None) => {
            instance.start = start;
            instance.end = duration.map(|fixed| start + fixed);
        }
        (None, Some(end)) => {
            instance.end = Some(end);
        }
        (None, None) => {}
    }

    instance.location_id = overrides
        .location_id
        .clone()
        .apply(instance.location_id.take());
    instance.description = overrides
        .description
        .clone()
        .apply(instance.description.take());
    instance.meeting_point = overrides
        .meeting_point
        .clone()
        .apply(instance.meeting_point.take());
    instance.meeting_time = overrides.meeting_time.clone().apply(instance.meeting_time);
}
