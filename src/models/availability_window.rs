use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Field;
use crate::schema::availability_window;
use crate::{DbConn, Error};

/// A manager-declared interval during which a field is forced unavailable,
/// independent of bookings
///
/// Windows only ever remove capacity; there is no window that overrides a
/// booking conflict.
#[derive(
	Clone, Debug, Deserialize, Serialize, Identifiable, Queryable, Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = availability_window)]
#[diesel(check_for_backend(Pg))]
pub struct AvailabilityWindow {
	pub id:         i32,
	pub field_id:   i32,
	pub start_time: DateTime<Utc>,
	pub end_time:   DateTime<Utc>,
	pub reason:     Option<String>,
	pub created_at: DateTime<Utc>,
}

impl AvailabilityWindow {
	/// Get all windows on a field intersecting `[start, end)`
	///
	/// A non-empty result means the field is blocked for that interval
	/// regardless of booking state.
	pub async fn find_blocking(
		f_id: i32,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let windows = conn
			.interact(move |conn| {
				availability_window::table
					.filter(availability_window::field_id.eq(f_id))
					.filter(availability_window::start_time.lt(end))
					.filter(availability_window::end_time.gt(start))
					.select(Self::as_select())
					.order(availability_window::start_time.asc())
					.load(conn)
			})
			.await??;

		Ok(windows)
	}

	/// Get all the windows for a specific [`Field`]
	pub async fn for_field(
		f_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let windows = conn
			.interact(move |conn| {
				availability_window::table
					.filter(availability_window::field_id.eq(f_id))
					.select(Self::as_select())
					.order(availability_window::start_time.asc())
					.load(conn)
			})
			.await??;

		Ok(windows)
	}

	/// Delete an [`AvailabilityWindow`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(w_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				diesel::delete(availability_window::table.find(w_id))
					.execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!(
				"unknown availability window {w_id}"
			)));
		}

		info!("deleted availability window {w_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = availability_window)]
pub struct NewAvailabilityWindow {
	pub field_id:   i32,
	pub start_time: DateTime<Utc>,
	pub end_time:   DateTime<Utc>,
	pub reason:     Option<String>,
}

impl NewAvailabilityWindow {
	/// Insert this [`NewAvailabilityWindow`]
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<AvailabilityWindow, Error> {
		if self.end_time <= self.start_time {
			return Err(Error::Validation(
				"an availability window must end after it starts".to_string(),
			));
		}

		// Surface unknown fields as a validation error instead of a foreign
		// key violation
		Field::get_by_id(self.field_id, conn).await.map_err(|err| {
			match err {
				Error::NotFound(m) => Error::Validation(m),
				err => err,
			}
		})?;

		let window = conn
			.interact(|conn| {
				diesel::insert_into(availability_window::table)
					.values(self)
					.returning(AvailabilityWindow::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"blocked field {} from {} to {}",
			window.field_id, window.start_time, window.end_time,
		);

		Ok(window)
	}
}
