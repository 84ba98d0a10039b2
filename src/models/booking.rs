use chrono::{DateTime, NaiveDate, Utc};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval;
use crate::models::{Customer, Field};
use crate::schema::{booking, booking_line_item};
use crate::{DbConn, Error};

/// Lock space for the per-field advisory locks taken while creating bookings
const BOOKING_LOCK_SPACE: i32 = 0x6269;

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingStatus"]
pub enum BookingStatus {
	#[default]
	Pending,
	Confirmed,
	Cancelled,
	Completed,
	NoShow,
}

impl BookingStatus {
	/// Whether a booking in this status holds its field's time slot
	#[must_use]
	pub fn holds_slot(self) -> bool {
		matches!(self, Self::Pending | Self::Confirmed)
	}

	/// Whether a booking may move from this status to `next`
	///
	/// Cancelled, completed and no-show are terminal. Completed and no-show
	/// are manager-triggered only; there is no time-based transition.
	#[must_use]
	pub fn can_transition_to(self, next: Self) -> bool {
		matches!(
			(self, next),
			(Self::Pending, Self::Confirmed | Self::Cancelled)
				| (
					Self::Confirmed,
					Self::Cancelled | Self::Completed | Self::NoShow
				)
		)
	}
}

/// A reservation of one field for one half-open time interval, owned by one
/// customer
///
/// Bookings are never physically deleted; they are cancelled instead.
#[derive(
	Clone, Debug, Deserialize, Serialize, Identifiable, Queryable, Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct Booking {
	pub id:                 i32,
	pub code:               String,
	pub field_id:           i32,
	pub customer_id:        i32,
	pub start_time:         DateTime<Utc>,
	pub end_time:           DateTime<Utc>,
	pub status:             BookingStatus,
	pub total_amount_cents: i64,
	pub notes:              Option<String>,
	pub confirmed_at:       Option<DateTime<Utc>>,
	pub created_at:         DateTime<Utc>,
	pub updated_at:         DateTime<Utc>,
}

/// An ancillary service or rental attached to a booking
#[derive(
	Associations,
	Clone,
	Debug,
	Deserialize,
	Serialize,
	Identifiable,
	Queryable,
	Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(belongs_to(Booking))]
#[diesel(table_name = booking_line_item)]
#[diesel(check_for_backend(Pg))]
pub struct BookingLineItem {
	pub id:           i32,
	pub booking_id:   i32,
	pub description:  String,
	pub amount_cents: i64,
}

impl Booking {
	/// Whether a slot-holding booking on the given field intersects
	/// `[start, end)`
	///
	/// Open-interval semantics: touching endpoints do not conflict.
	pub async fn exists_overlap(
		f_id: i32,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let found = conn
			.interact(move |conn| Self::overlap_exists(f_id, start, end, conn))
			.await??;

		Ok(found)
	}

	fn overlap_exists(
		f_id: i32,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
		conn: &mut PgConnection,
	) -> QueryResult<bool> {
		diesel::select(diesel::dsl::exists(
			booking::table
				.filter(booking::field_id.eq(f_id))
				.filter(booking::status.eq_any([
					BookingStatus::Pending,
					BookingStatus::Confirmed,
				]))
				.filter(booking::start_time.lt(end))
				.filter(booking::end_time.gt(start)),
		))
		.get_result(conn)
	}

	/// Get a [`Booking`] by its id
	pub async fn get_by_id(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				booking::table
					.find(b_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await?
			.map_err(|err| match err {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("unknown booking {b_id}"))
				},
				err => err.into(),
			})?;

		Ok(result)
	}

	/// Get a [`Booking`] by its human-readable code
	pub async fn get_by_code(
		code: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				booking::table
					.filter(booking::code.eq(&code))
					.select(Self::as_select())
					.get_result(conn)
					.map_err(|err| match err {
						diesel::result::Error::NotFound => {
							Error::NotFound(format!("unknown booking {code}"))
						},
						err => err.into(),
					})
			})
			.await??;

		Ok(result)
	}

	/// Get the line items attached to a [`Booking`]
	pub async fn line_items(
		b_id: i32,
		conn: &DbConn,
	) -> Result<Vec<BookingLineItem>, Error> {
		let items = conn
			.interact(move |conn| {
				booking_line_item::table
					.filter(booking_line_item::booking_id.eq(b_id))
					.select(BookingLineItem::as_select())
					.order(booking_line_item::id.asc())
					.load(conn)
			})
			.await??;

		Ok(items)
	}

	/// Get all slot-holding bookings on a field intersecting `[start, end)`
	pub async fn active_for_field_between(
		f_id: i32,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				booking::table
					.filter(booking::field_id.eq(f_id))
					.filter(booking::status.eq_any([
						BookingStatus::Pending,
						BookingStatus::Confirmed,
					]))
					.filter(booking::start_time.lt(end))
					.filter(booking::end_time.gt(start))
					.select(Self::as_select())
					.order(booking::start_time.asc())
					.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Get all the bookings for a specific [`Field`], optionally filtered to
	/// a single day
	pub async fn for_field(
		f_id: i32,
		date: Option<NaiveDate>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				let mut query = booking::table
					.filter(booking::field_id.eq(f_id))
					.select(Self::as_select())
					.into_boxed();

				if let Some(date) = date {
					let day_start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
					let day_end = day_start + chrono::TimeDelta::days(1);

					query = query
						.filter(booking::start_time.lt(day_end))
						.filter(booking::end_time.gt(day_start));
				}

				query.order(booking::start_time.asc()).load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Get all the bookings owned by a specific [`Customer`]
	pub async fn for_customer(
		c_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				booking::table
					.filter(booking::customer_id.eq(c_id))
					.select(Self::as_select())
					.order(booking::start_time.asc())
					.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Move a [`Booking`] to the given status
	///
	/// The current row is locked for the duration of the transaction so two
	/// concurrent transitions cannot both pass the state-machine guard.
	#[instrument(skip(conn))]
	pub async fn transition(
		b_id: i32,
		next: BookingStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let current: Self = booking::table
						.find(b_id)
						.for_update()
						.select(Self::as_select())
						.get_result(conn)
						.map_err(|err| match err {
							diesel::result::Error::NotFound => {
								Error::NotFound(format!(
									"unknown booking {b_id}"
								))
							},
							err => err.into(),
						})?;

					if !current.status.can_transition_to(next) {
						return Err(Error::InvalidState(format!(
							"booking {} cannot move from {:?} to {next:?}",
							current.code, current.status,
						)));
					}

					let now = Utc::now();
					let confirmed_at = if next == BookingStatus::Confirmed {
						Some(now)
					} else {
						current.confirmed_at
					};

					let updated = diesel::update(booking::table.find(b_id))
						.set((
							booking::status.eq(next),
							booking::confirmed_at.eq(confirmed_at),
							booking::updated_at.eq(now),
						))
						.returning(Self::as_returning())
						.get_result(conn)?;

					Ok(updated)
				})
			})
			.await??;

		info!("booking {} moved to {next:?}", updated.code);

		Ok(updated)
	}

	/// Confirm a pending [`Booking`]
	pub async fn confirm(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		Self::transition(b_id, BookingStatus::Confirmed, conn).await
	}

	/// Cancel a pending or confirmed [`Booking`], freeing its slot
	pub async fn cancel(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		Self::transition(b_id, BookingStatus::Cancelled, conn).await
	}

	/// Mark a confirmed [`Booking`] as completed
	pub async fn complete(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		Self::transition(b_id, BookingStatus::Completed, conn).await
	}

	/// Mark a confirmed [`Booking`] as a no-show
	pub async fn mark_no_show(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		Self::transition(b_id, BookingStatus::NoShow, conn).await
	}
}

#[derive(Clone, Debug)]
pub struct NewBookingLineItem {
	pub description:  String,
	pub amount_cents: i64,
}

#[derive(Clone, Debug)]
pub struct NewBooking {
	pub field_id:    i32,
	pub customer_id: i32,
	pub start_time:  DateTime<Utc>,
	pub end_time:    DateTime<Utc>,
	pub notes:       Option<String>,
	pub line_items:  Vec<NewBookingLineItem>,
}

impl NewBooking {
	/// Insert this [`NewBooking`] in pending status
	///
	/// Validation failures are rejected before any write. The overlap check
	/// and the insert run in one transaction holding a per-field advisory
	/// lock, so concurrent creators on the same field serialize while other
	/// fields stay unblocked. The `booking_no_overlap` exclusion constraint
	/// backs the same invariant at the storage layer.
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Booking, Error> {
		if self.end_time <= self.start_time {
			return Err(Error::Validation(
				"a booking must end after it starts".to_string(),
			));
		}

		let field = match Field::get_by_id(self.field_id, conn).await {
			Ok(field) => field,
			Err(Error::NotFound(_)) => {
				return Err(Error::Validation(format!(
					"unknown field {}",
					self.field_id
				)));
			},
			Err(err) => return Err(err),
		};

		if !field.is_active {
			return Err(Error::Validation(format!(
				"field {} is not active",
				field.id
			)));
		}

		if !Customer::exists(self.customer_id, conn).await? {
			return Err(Error::Validation(format!(
				"unknown customer {}",
				self.customer_id
			)));
		}

		if self.line_items.iter().any(|item| item.amount_cents < 0) {
			return Err(Error::Validation(
				"line item amounts must not be negative".to_string(),
			));
		}

		let hours = interval::billable_hours(self.start_time, self.end_time);
		let extras: i64 =
			self.line_items.iter().map(|item| item.amount_cents).sum();
		let total_amount_cents = field.price_per_hour_cents * hours + extras;

		let code = generate_code();

		let booking = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					// Serialize slot creation per field
					diesel::sql_query(
						"SELECT pg_advisory_xact_lock($1, $2)",
					)
					.bind::<Integer, _>(BOOKING_LOCK_SPACE)
					.bind::<Integer, _>(self.field_id)
					.execute(conn)?;

					if Booking::overlap_exists(
						self.field_id,
						self.start_time,
						self.end_time,
						conn,
					)? {
						return Err(Error::Conflict(
							"the requested time slot is no longer available"
								.to_string(),
						));
					}

					let booking: Booking =
						diesel::insert_into(booking::table)
							.values((
								booking::code.eq(code),
								booking::field_id.eq(self.field_id),
								booking::customer_id.eq(self.customer_id),
								booking::start_time.eq(self.start_time),
								booking::end_time.eq(self.end_time),
								booking::total_amount_cents
									.eq(total_amount_cents),
								booking::notes.eq(self.notes),
							))
							.returning(Booking::as_returning())
							.get_result(conn)?;

					let items: Vec<_> = self
						.line_items
						.iter()
						.map(|item| {
							(
								booking_line_item::booking_id.eq(booking.id),
								booking_line_item::description
									.eq(item.description.clone()),
								booking_line_item::amount_cents
									.eq(item.amount_cents),
							)
						})
						.collect();

					if !items.is_empty() {
						diesel::insert_into(booking_line_item::table)
							.values(items)
							.execute(conn)?;
					}

					Ok(booking)
				})
			})
			.await??;

		info!(
			"created booking {} for field {} [{} - {}]",
			booking.code, booking.field_id, booking.start_time,
			booking.end_time,
		);

		Ok(booking)
	}
}

/// Generate a unique human-readable booking code
fn generate_code() -> String {
	let tail = Uuid::new_v4().simple().to_string();

	format!("BK-{}", tail[..8].to_uppercase())
}
