//! Half-open interval algebra shared by the booking, availability, and
//! maintenance ledgers
//!
//! All intervals are `[start, end)`: a booking ending at 10:00 never
//! conflicts with one starting at 10:00.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

/// First bookable hour of the day (UTC)
pub const OPENING_HOUR: u32 = 8;
/// First non-bookable hour of the day (UTC)
pub const CLOSING_HOUR: u32 = 22;
/// Granularity of the public slot listing
pub const SLOT_MINUTES: i64 = 60;

/// Whether two half-open intervals share more than a single boundary instant
#[must_use]
pub fn overlaps(
	s1: DateTime<Utc>,
	e1: DateTime<Utc>,
	s2: DateTime<Utc>,
	e2: DateTime<Utc>,
) -> bool {
	s1 < e2 && e1 > s2
}

/// The number of billable hours for a booking interval
///
/// Partial hours are rounded up and every booking is billed for at least one
/// hour.
#[must_use]
pub fn billable_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
	let minutes = (end - start).num_minutes();

	(minutes.div_euclid(60) + i64::from(minutes.rem_euclid(60) != 0)).max(1)
}

/// Partition the business hours of a day into fixed-size candidate slots
#[must_use]
pub fn day_slots(date: NaiveDate) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
	let (open, close) = business_hours(date);

	let mut slots = vec![];
	let mut start = open;

	while start < close {
		let end = start + TimeDelta::minutes(SLOT_MINUTES);
		slots.push((start, end));
		start = end;
	}

	slots
}

/// The opening and closing instants of a day
#[must_use]
pub fn business_hours(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
	// The hour constants are in range so and_hms_opt cannot fail
	let open = date.and_hms_opt(OPENING_HOUR, 0, 0).unwrap().and_utc();
	let close = date.and_hms_opt(CLOSING_HOUR, 0, 0).unwrap().and_utc();

	(open, close)
}
