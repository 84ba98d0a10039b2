use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::customer;
use crate::{DbConn, Error};

/// A minimal stand-in for the external account directory; the booking core
/// only needs to resolve customer ids to rows that own bookings
#[derive(
	Clone, Debug, Deserialize, Serialize, Identifiable, Queryable, Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = customer)]
#[diesel(check_for_backend(Pg))]
pub struct Customer {
	pub id:           i32,
	pub display_name: String,
	pub email:        String,
	pub created_at:   DateTime<Utc>,
}

impl Customer {
	/// Whether a customer with the given id exists
	pub async fn exists(c_id: i32, conn: &DbConn) -> Result<bool, Error> {
		let found = conn
			.interact(move |conn| {
				diesel::select(diesel::dsl::exists(
					customer::table.filter(customer::id.eq(c_id)),
				))
				.get_result(conn)
			})
			.await??;

		Ok(found)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = customer)]
pub struct NewCustomer {
	pub display_name: String,
	pub email:        String,
}

impl NewCustomer {
	/// Insert this [`NewCustomer`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Customer, Error> {
		let customer = conn
			.interact(|conn| {
				diesel::insert_into(customer::table)
					.values(self)
					.returning(Customer::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created customer {}", customer.id);

		Ok(customer)
	}
}
