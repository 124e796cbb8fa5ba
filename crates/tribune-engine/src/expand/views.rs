//! Dashboard and listing views over expanded instances.
//!
//! Thin conveniences on top of an already filtered, sorted instance list;
//! the dashboard, calendar, and statistics screens all consume these.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tribune_model::instance::AppointmentInstance;

/// Instances starting at or after `from`, truncated to `limit`.
///
/// Callers pass the start of "today" in club-local time for the dashboard's
/// upcoming list.
#[must_use]
pub fn upcoming(
    instances: &[AppointmentInstance],
    from: DateTime<Utc>,
    limit: usize,
) -> Vec<AppointmentInstance> {
    instances
        .iter()
        .filter(|instance| instance.start >= from)
        .take(limit)
        .cloned()
        .collect()
}

/// Result of partitioning instances for the dashboard.
#[derive(Debug, Clone, Default)]
pub struct HeadlineSplit {
    /// Instances of the distinguished headline type.
    pub headline: Vec<AppointmentInstance>,
    /// Everything else.
    pub other: Vec<AppointmentInstance>,
}

/// ## Summary
/// Partitions instances into the dashboard's headline-event slot and the
/// regular list.
///
/// The headline slot holds instances whose appointment-type *name* (resolved
/// through the `type_names` catalog) matches the configured sentinel,
/// case-insensitively. Both sides are truncated independently to `limit`,
/// keeping the input order.
#[must_use]
pub fn split_headline(
    instances: &[AppointmentInstance],
    type_names: &HashMap<String, String>,
    sentinel: &str,
    limit: usize,
) -> HeadlineSplit {
    let mut split = HeadlineSplit::default();
    for instance in instances {
        let is_headline = type_names
            .get(&instance.type_id)
            .is_some_and(|name| name.eq_ignore_ascii_case(sentinel));
        let bucket = if is_headline {
            &mut split.headline
        } else {
            &mut split.other
        };
        if bucket.len() < limit {
            bucket.push(instance.clone());
        }
    }
    split
}
