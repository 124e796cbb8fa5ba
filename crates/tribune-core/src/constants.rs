/// Expansion guard rails shared across crates.
///
/// The cap bounds runaway unrolling when a recurrence end date is missing or
/// invalid; the window bounds recurrences that have no end date at all.
pub const DEFAULT_ITERATION_CAP: u32 = 500;
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Appointment-type name that marks the dashboard's headline slot.
pub const HEADLINE_TYPE_NAME: &str = "match day";

/// Separator between template id and ISO day in a virtual occurrence id.
pub const VIRTUAL_ID_SEPARATOR: char = '_';
