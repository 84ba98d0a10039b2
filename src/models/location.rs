use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::location;
use crate::{DbConn, Error};

/// A venue grouping one or more fields
#[derive(
	Clone, Debug, Deserialize, Serialize, Identifiable, Queryable, Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = location)]
#[diesel(check_for_backend(Pg))]
pub struct Location {
	pub id:         i32,
	pub name:       String,
	pub city:       String,
	pub created_at: DateTime<Utc>,
}

impl Location {
	/// Get all [`Location`]s
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let locations = conn
			.interact(|conn| {
				location::table
					.select(Self::as_select())
					.order(location::id.asc())
					.load(conn)
			})
			.await??;

		Ok(locations)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = location)]
pub struct NewLocation {
	pub name: String,
	pub city: String,
}

impl NewLocation {
	/// Insert this [`NewLocation`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Location, Error> {
		let location = conn
			.interact(|conn| {
				diesel::insert_into(location::table)
					.values(self)
					.returning(Location::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created location {} ({})", location.id, location.name);

		Ok(location)
	}
}
