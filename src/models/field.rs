use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::field;
use crate::{DbConn, Error};

/// A bookable pitch
///
/// Fields are never hard-deleted while bookings reference them; they are
/// soft-deactivated via `is_active` instead.
#[derive(
	Clone, Debug, Deserialize, Serialize, Identifiable, Queryable, Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = field)]
#[diesel(check_for_backend(Pg))]
pub struct Field {
	pub id:                   i32,
	pub location_id:          i32,
	pub name:                 String,
	pub description:          Option<String>,
	pub price_per_hour_cents: i64,
	pub is_active:            bool,
	pub manager_id:           i32,
	pub created_at:           DateTime<Utc>,
	pub updated_at:           DateTime<Utc>,
}

impl Field {
	/// Get a [`Field`] by its id
	pub async fn get_by_id(f_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				field::table
					.find(f_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await?
			.map_err(|err| match err {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("unknown field {f_id}"))
				},
				err => err.into(),
			})?;

		Ok(result)
	}

	/// Get all [`Field`]s, optionally filtered by location
	pub async fn get_all(
		location: Option<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let fields = conn
			.interact(move |conn| {
				let mut query =
					field::table.select(Self::as_select()).into_boxed();

				if let Some(l_id) = location {
					query = query.filter(field::location_id.eq(l_id));
				}

				query.order(field::id.asc()).load(conn)
			})
			.await??;

		Ok(fields)
	}

	/// Get all active [`Field`]s, optionally filtered by location
	pub async fn get_active(
		location: Option<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let fields = conn
			.interact(move |conn| {
				let mut query = field::table
					.filter(field::is_active.eq(true))
					.select(Self::as_select())
					.into_boxed();

				if let Some(l_id) = location {
					query = query.filter(field::location_id.eq(l_id));
				}

				query.order(field::id.asc()).load(conn)
			})
			.await??;

		Ok(fields)
	}

	/// Soft-deactivate a [`Field`] by its id
	///
	/// Deactivated fields are never offered as available regardless of
	/// ledger state.
	#[instrument(skip(conn))]
	pub async fn deactivate(f_id: i32, conn: &DbConn) -> Result<(), Error> {
		let updated = conn
			.interact(move |conn| {
				diesel::update(field::table.find(f_id))
					.set((
						field::is_active.eq(false),
						field::updated_at.eq(Utc::now()),
					))
					.execute(conn)
			})
			.await??;

		if updated == 0 {
			return Err(Error::NotFound(format!("unknown field {f_id}")));
		}

		info!("deactivated field {f_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = field)]
pub struct NewField {
	pub location_id:          i32,
	pub name:                 String,
	pub description:          Option<String>,
	pub price_per_hour_cents: i64,
	pub manager_id:           i32,
}

impl NewField {
	/// Insert this [`NewField`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Field, Error> {
		let field = conn
			.interact(|conn| {
				diesel::insert_into(field::table)
					.values(self)
					.returning(Field::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created field {} ({})", field.id, field.name);

		Ok(field)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = field)]
pub struct FieldUpdate {
	pub name:                 Option<String>,
	pub description:          Option<String>,
	pub price_per_hour_cents: Option<i64>,
	pub is_active:            Option<bool>,
}

impl FieldUpdate {
	/// Apply this update to the [`Field`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply(self, f_id: i32, conn: &DbConn) -> Result<Field, Error> {
		let field = conn
			.interact(move |conn| {
				diesel::update(field::table.find(f_id))
					.set((self, field::updated_at.eq(Utc::now())))
					.returning(Field::as_returning())
					.get_result(conn)
			})
			.await?
			.map_err(|err| match err {
				diesel::result::Error::NotFound => {
					Error::NotFound(format!("unknown field {f_id}"))
				},
				err => err.into(),
			})?;

		info!("updated field {f_id}");

		Ok(field)
	}
}
