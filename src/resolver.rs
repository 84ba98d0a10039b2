//! The slot resolver
//!
//! Composes the booking ledger, the availability ledger, and the maintenance
//! schedule into a single verdict on whether a field is bookable for a given
//! interval. The resolver owns no state of its own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AvailabilityWindow, Booking, Field, MaintenanceRecord};
use crate::{DbConn, Error, interval};

/// The outcome of checking a field for a candidate interval
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum Verdict {
	Available,
	/// The field is deactivated
	Inactive,
	/// A pending or confirmed booking intersects the interval
	Booked,
	/// An availability window intersects the interval
	Blocked,
	/// A scheduled or in-progress maintenance task intersects the interval
	Maintenance,
}

impl Verdict {
	#[must_use]
	pub fn is_available(self) -> bool { self == Self::Available }
}

/// Check a single field for a candidate interval
///
/// The checks short-circuit, cheapest first: active flag, bookings,
/// availability windows, maintenance.
pub async fn check_slot(
	field: &Field,
	start: DateTime<Utc>,
	end: DateTime<Utc>,
	conn: &DbConn,
) -> Result<Verdict, Error> {
	if !field.is_active {
		return Ok(Verdict::Inactive);
	}

	if Booking::exists_overlap(field.id, start, end, conn).await? {
		return Ok(Verdict::Booked);
	}

	let windows =
		AvailabilityWindow::find_blocking(field.id, start, end, conn).await?;
	if !windows.is_empty() {
		return Ok(Verdict::Blocked);
	}

	let planned =
		MaintenanceRecord::find_planned_in_range(field.id, start, end, conn)
			.await?;
	if !planned.is_empty() {
		return Ok(Verdict::Maintenance);
	}

	Ok(Verdict::Available)
}

/// Whether the field with the given id is bookable for `[start, end)`
pub async fn is_available(
	f_id: i32,
	start: DateTime<Utc>,
	end: DateTime<Utc>,
	conn: &DbConn,
) -> Result<bool, Error> {
	let field = Field::get_by_id(f_id, conn).await?;
	let verdict = check_slot(&field, start, end, conn).await?;

	Ok(verdict.is_available())
}

/// Get all active fields bookable for `[start, end)`, optionally filtered by
/// location
///
/// One round of ledger queries per field; acceptable at single-venue scale.
pub async fn list_available_fields(
	location_id: Option<i32>,
	start: DateTime<Utc>,
	end: DateTime<Utc>,
	conn: &DbConn,
) -> Result<Vec<Field>, Error> {
	let mut available = vec![];

	for field in Field::get_active(location_id, conn).await? {
		if check_slot(&field, start, end, conn).await?.is_available() {
			available.push(field);
		}
	}

	Ok(available)
}

/// One fixed-size slot in a field's daily listing
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
	pub start:     DateTime<Utc>,
	pub end:       DateTime<Utc>,
	pub available: bool,
}

/// Partition a field's business hours on the given day into slots and
/// classify each one
///
/// The day's bookings, windows, and maintenance records are loaded once and
/// every slot is classified in memory with the same interval algebra.
pub async fn daily_time_slots(
	f_id: i32,
	date: NaiveDate,
	conn: &DbConn,
) -> Result<Vec<TimeSlot>, Error> {
	let field = Field::get_by_id(f_id, conn).await?;

	let (open, close) = interval::business_hours(date);

	let bookings =
		Booking::active_for_field_between(f_id, open, close, conn).await?;
	let windows =
		AvailabilityWindow::find_blocking(f_id, open, close, conn).await?;
	let planned =
		MaintenanceRecord::find_planned_in_range(f_id, open, close, conn)
			.await?;

	Ok(classify_slots(&field, date, &bookings, &windows, &planned))
}

fn classify_slots(
	field: &Field,
	date: NaiveDate,
	bookings: &[Booking],
	windows: &[AvailabilityWindow],
	planned: &[MaintenanceRecord],
) -> Vec<TimeSlot> {
	interval::day_slots(date)
		.into_iter()
		.map(|(start, end)| {
			let booked = bookings.iter().any(|b| {
				interval::overlaps(b.start_time, b.end_time, start, end)
			});
			let blocked = windows.iter().any(|w| {
				interval::overlaps(w.start_time, w.end_time, start, end)
			});
			let in_maintenance = planned.iter().any(|m| {
				let (s, e) = m.effective_interval();

				interval::overlaps(s, e, start, end)
			});

			let available =
				field.is_active && !booked && !blocked && !in_maintenance;

			TimeSlot { start, end, available }
		})
		.collect()
}
