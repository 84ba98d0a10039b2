use chrono::{DateTime, TimeDelta, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::interval;
use crate::models::Field;
use crate::schema::maintenance;
use crate::{DbConn, Error};

/// Duration assumed for maintenance tasks that do not specify one
pub const DEFAULT_DURATION_HOURS: i32 = 2;

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::MaintenanceKind"]
pub enum MaintenanceKind {
	#[default]
	Routine,
	Repair,
	Upgrade,
	Cleaning,
	Inspection,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::MaintenanceStatus"]
pub enum MaintenanceStatus {
	#[default]
	Scheduled,
	InProgress,
	Completed,
	Cancelled,
}

impl MaintenanceStatus {
	/// Whether a record in this status blocks its field
	#[must_use]
	pub fn is_blocking(self) -> bool {
		matches!(self, Self::Scheduled | Self::InProgress)
	}

	/// Whether a record may move from this status to `next`
	#[must_use]
	pub fn can_transition_to(self, next: Self) -> bool {
		matches!(
			(self, next),
			(
				Self::Scheduled,
				Self::InProgress | Self::Completed | Self::Cancelled
			) | (Self::InProgress, Self::Completed | Self::Cancelled)
		)
	}
}

/// A scheduled or in-progress upkeep task on a field
///
/// The blocked interval is derived from the scheduled start and the
/// estimated duration; it is never stored.
#[derive(
	Clone, Debug, Deserialize, Serialize, Identifiable, Queryable, Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = maintenance)]
#[diesel(check_for_backend(Pg))]
pub struct MaintenanceRecord {
	pub id:                       i32,
	pub field_id:                 i32,
	pub title:                    String,
	pub kind:                     MaintenanceKind,
	pub status:                   MaintenanceStatus,
	pub scheduled_at:             DateTime<Utc>,
	pub estimated_duration_hours: Option<i32>,
	pub completed_at:             Option<DateTime<Utc>>,
	pub cost_cents:               Option<i64>,
	pub performed_by:             Option<String>,
	pub created_at:               DateTime<Utc>,
	pub updated_at:               DateTime<Utc>,
}

impl MaintenanceRecord {
	/// The interval during which this record blocks its field
	#[must_use]
	pub fn effective_interval(&self) -> (DateTime<Utc>, DateTime<Utc>) {
		let hours = self
			.estimated_duration_hours
			.unwrap_or(DEFAULT_DURATION_HOURS);

		(self.scheduled_at, self.scheduled_at + TimeDelta::hours(hours.into()))
	}

	/// Get all blocking records on a field whose effective interval
	/// intersects `[start, end)`
	///
	/// The effective end is a derived value, so the interval test runs over
	/// the loaded rows rather than in the query itself.
	pub async fn find_planned_in_range(
		f_id: i32,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let records = conn
			.interact(move |conn| {
				maintenance::table
					.filter(maintenance::field_id.eq(f_id))
					.filter(maintenance::status.eq_any([
						MaintenanceStatus::Scheduled,
						MaintenanceStatus::InProgress,
					]))
					.select(Self::as_select())
					.order(maintenance::scheduled_at.asc())
					.load(conn)
			})
			.await??;

		let blocking = records
			.into_iter()
			.filter(|record| {
				let (s, e) = record.effective_interval();

				interval::overlaps(s, e, start, end)
			})
			.collect();

		Ok(blocking)
	}

	/// Get a [`MaintenanceRecord`] by its id
	pub async fn get_by_id(m_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let record = conn
			.interact(move |conn| {
				maintenance::table
					.find(m_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await?
			.map_err(|err| match err {
				diesel::result::Error::NotFound => Error::NotFound(format!(
					"unknown maintenance record {m_id}"
				)),
				err => err.into(),
			})?;

		Ok(record)
	}

	/// Get all the records for a specific [`Field`]
	pub async fn for_field(
		f_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let records = conn
			.interact(move |conn| {
				maintenance::table
					.filter(maintenance::field_id.eq(f_id))
					.select(Self::as_select())
					.order(maintenance::scheduled_at.asc())
					.load(conn)
			})
			.await??;

		Ok(records)
	}

	/// Move a [`MaintenanceRecord`] to the given status
	///
	/// Completing a record stamps its completion time.
	#[instrument(skip(conn))]
	pub async fn update_status(
		m_id: i32,
		next: MaintenanceStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let current: Self = maintenance::table
						.find(m_id)
						.for_update()
						.select(Self::as_select())
						.get_result(conn)
						.map_err(|err| match err {
							diesel::result::Error::NotFound => {
								Error::NotFound(format!(
									"unknown maintenance record {m_id}"
								))
							},
							err => err.into(),
						})?;

					if !current.status.can_transition_to(next) {
						return Err(Error::InvalidState(format!(
							"maintenance record {m_id} cannot move from {:?} \
							 to {next:?}",
							current.status,
						)));
					}

					let now = Utc::now();
					let completed_at = if next == MaintenanceStatus::Completed
					{
						Some(now)
					} else {
						current.completed_at
					};

					let updated =
						diesel::update(maintenance::table.find(m_id))
							.set((
								maintenance::status.eq(next),
								maintenance::completed_at.eq(completed_at),
								maintenance::updated_at.eq(now),
							))
							.returning(Self::as_returning())
							.get_result(conn)?;

					Ok(updated)
				})
			})
			.await??;

		info!("maintenance record {m_id} moved to {next:?}");

		Ok(updated)
	}

	/// Delete a [`MaintenanceRecord`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(m_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				diesel::delete(maintenance::table.find(m_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!(
				"unknown maintenance record {m_id}"
			)));
		}

		info!("deleted maintenance record {m_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = maintenance)]
pub struct NewMaintenanceRecord {
	pub field_id:                 i32,
	pub title:                    String,
	pub kind:                     MaintenanceKind,
	pub scheduled_at:             DateTime<Utc>,
	pub estimated_duration_hours: Option<i32>,
	pub cost_cents:               Option<i64>,
	pub performed_by:             Option<String>,
}

impl NewMaintenanceRecord {
	/// Insert this [`NewMaintenanceRecord`] in scheduled status
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<MaintenanceRecord, Error> {
		if self.estimated_duration_hours.is_some_and(|hours| hours <= 0) {
			return Err(Error::Validation(
				"the estimated duration must be positive".to_string(),
			));
		}

		Field::get_by_id(self.field_id, conn).await.map_err(|err| {
			match err {
				Error::NotFound(m) => Error::Validation(m),
				err => err,
			}
		})?;

		let record = conn
			.interact(|conn| {
				diesel::insert_into(maintenance::table)
					.values(self)
					.returning(MaintenanceRecord::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"scheduled {:?} maintenance {} on field {}",
			record.kind, record.id, record.field_id,
		);

		Ok(record)
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	fn record(
		duration: Option<i32>,
		status: MaintenanceStatus,
	) -> MaintenanceRecord {
		let scheduled_at = NaiveDate::from_ymd_opt(2030, 5, 1)
			.unwrap()
			.and_hms_opt(8, 0, 0)
			.unwrap()
			.and_utc();

		MaintenanceRecord {
			id: 1,
			field_id: 1,
			title: "pitch relining".to_string(),
			kind: MaintenanceKind::Routine,
			status,
			scheduled_at,
			estimated_duration_hours: duration,
			completed_at: None,
			cost_cents: None,
			performed_by: None,
			created_at: scheduled_at,
			updated_at: scheduled_at,
		}
	}

	#[test]
	fn effective_interval_uses_estimated_duration() {
		let record = record(Some(3), MaintenanceStatus::Scheduled);
		let (start, end) = record.effective_interval();

		assert_eq!(end - start, TimeDelta::hours(3));
	}

	#[test]
	fn effective_interval_defaults_to_two_hours() {
		let record = record(None, MaintenanceStatus::Scheduled);
		let (start, end) = record.effective_interval();

		assert_eq!(end - start, TimeDelta::hours(2));
	}

	#[test]
	fn only_scheduled_and_in_progress_block() {
		assert!(MaintenanceStatus::Scheduled.is_blocking());
		assert!(MaintenanceStatus::InProgress.is_blocking());
		assert!(!MaintenanceStatus::Completed.is_blocking());
		assert!(!MaintenanceStatus::Cancelled.is_blocking());
	}

	#[test]
	fn status_machine() {
		use MaintenanceStatus::*;

		assert!(Scheduled.can_transition_to(InProgress));
		assert!(Scheduled.can_transition_to(Completed));
		assert!(Scheduled.can_transition_to(Cancelled));
		assert!(InProgress.can_transition_to(Completed));
		assert!(InProgress.can_transition_to(Cancelled));

		assert!(!InProgress.can_transition_to(Scheduled));
		assert!(!Completed.can_transition_to(InProgress));
		assert!(!Cancelled.can_transition_to(Scheduled));
	}
}
