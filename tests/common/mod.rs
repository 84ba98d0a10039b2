use std::sync::LazyLock;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, NaiveDate, Utc};
use deadpool_diesel::postgres::{Manager, Pool};
use diesel_migrations::{
	EmbeddedMigrations,
	MigrationHarness,
	embed_migrations,
};
use pitchbook::models::{Customer, Field, Location};
use pitchbook::{AppState, Config, DbConn, DbPool, routes};
use serde_json::json;
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

/// Global provider of one-shot test databases
static TEST_DATABASE: LazyLock<TestDatabase> = LazyLock::new(TestDatabase::new);

/// All tests book on this day
pub const TEST_DATE: &str = "2030-05-01";

/// Format a timestamp for use in a query string
///
/// The Z suffix matters: a '+00:00' offset would be decoded as a space.
pub fn iso(ts: DateTime<Utc>) -> String {
	ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// A timestamp on the test day
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
	NaiveDate::from_ymd_opt(2030, 5, 1)
		.unwrap()
		.and_hms_opt(hour, minute, 0)
		.unwrap()
		.and_utc()
}

struct TestDatabase {
	base_url:  String,
	root_pool: DbPool,
}

impl TestDatabase {
	fn new() -> Self {
		let database_url = std::env::var("DATABASE_URL").unwrap();
		let (base_url, _) = database_url.rsplit_once('/').unwrap();
		let base_url = base_url.to_string();

		let manager =
			Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
		let root_pool = Pool::builder(manager).build().unwrap();

		Self { base_url, root_pool }
	}

	/// Create a fresh database and return a guard that drops it again
	async fn acquire(&self) -> DatabaseGuard {
		let uuid = Uuid::new_v4().simple().to_string();
		let database_name = format!("test_{uuid}");
		let database_url = format!("{}/{}", self.base_url, database_name);

		let root_conn = self
			.root_pool
			.get()
			.await
			.expect("could not get root pool connection");

		let create_db_query = format!("CREATE DATABASE {database_name};");

		root_conn
			.interact(|conn| {
				use diesel::prelude::*;

				diesel::sql_query(create_db_query).execute(conn)
			})
			.await
			.expect("could not interact with root connection")
			.expect("could not create test database");

		DatabaseGuard { root_conn, database_name, database_url }
	}
}

/// A RAII guard for a one-shot test database
pub struct DatabaseGuard {
	root_conn:     DbConn,
	database_name: String,
	database_url:  String,
}

impl DatabaseGuard {
	/// Create a migrated pool for this test database
	fn create_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.clone(),
			deadpool_diesel::Runtime::Tokio1,
		);

		let pool = Pool::builder(manager).build().unwrap();

		futures::executor::block_on(async {
			let conn = pool.get().await.unwrap();
			conn.interact(|conn| {
				conn.run_pending_migrations(MIGRATIONS).map(|_| ())
			})
			.await
			.unwrap()
			.unwrap();
		});

		pool
	}
}

impl Drop for DatabaseGuard {
	fn drop(&mut self) {
		let drop_db_query =
			format!("DROP DATABASE {} WITH (FORCE);", self.database_name);

		futures::executor::block_on(async move {
			self.root_conn
				.interact(|conn| {
					use diesel::prelude::*;

					diesel::sql_query(drop_db_query).execute(conn)
				})
				.await
				.expect("could not interact with root connection")
				.expect("could not drop test database");
		});
	}
}

/// A test app over a one-shot database, pre-seeded with two locations, a few
/// fields and a customer
#[allow(dead_code)]
pub struct TestEnv {
	pub app:                TestServer,
	pub pool:               DbPool,
	pub location_id:        i32,
	pub second_location_id: i32,
	/// Active field in the first location, 50.00 per hour
	pub field_id:           i32,
	/// Active field in the first location, 75.00 per hour
	pub second_field_id:    i32,
	/// Active field in the second location
	pub remote_field_id:    i32,
	/// Deactivated field in the first location
	pub inactive_field_id:  i32,
	pub customer_id:        i32,
	db_guard:               DatabaseGuard,
}

impl TestEnv {
	/// Get a seeded test environment with a one-shot database
	///
	/// # Panics
	/// Panics if building the test server or seeding fails
	pub async fn new() -> Self {
		let config = Config::from_env();

		let db_guard = (*TEST_DATABASE).acquire().await;
		let pool = db_guard.create_pool();

		let state = AppState { config, database_pool: pool.clone() };
		let app = TestServer::new(routes::get_app_router(state)).unwrap();

		let location_id = create_location(&app, "Riverside Park", "Ghent").await;
		let second_location_id =
			create_location(&app, "Harbour Halls", "Antwerp").await;

		let field_id = create_field(&app, location_id, "Pitch A", 50_00).await;
		let second_field_id =
			create_field(&app, location_id, "Pitch B", 75_00).await;
		let remote_field_id =
			create_field(&app, second_location_id, "Hall 1", 60_00).await;

		let inactive_field_id =
			create_field(&app, location_id, "Pitch C", 50_00).await;
		let response =
			app.delete(&format!("/fields/{inactive_field_id}")).await;
		assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

		let response = app
			.post("/customers")
			.json(&json!({
				"displayName": "Bob de Bouwer",
				"email": "bob@example.com",
			}))
			.await;
		assert_eq!(response.status_code(), StatusCode::CREATED);
		let customer_id = response.json::<Customer>().id;

		TestEnv {
			app,
			pool,
			location_id,
			second_location_id,
			field_id,
			second_field_id,
			remote_field_id,
			inactive_field_id,
			customer_id,
			db_guard,
		}
	}

	/// Request a booking for the seeded customer
	pub async fn request_booking(
		&self,
		f_id: i32,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
	) -> axum_test::TestResponse {
		self.app
			.post(&format!("/fields/{f_id}/bookings"))
			.json(&json!({
				"customerId": self.customer_id,
				"startTime": start,
				"endTime": end,
			}))
			.await
	}

	/// Check a field's availability for an interval
	pub async fn is_available(
		&self,
		f_id: i32,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
	) -> bool {
		let response = self
			.app
			.get(&format!(
				"/fields/{f_id}/availability?start={}&end={}",
				iso(start),
				iso(end),
			))
			.await;
		assert_eq!(response.status_code(), StatusCode::OK);

		response.json::<serde_json::Value>()["available"]
			.as_bool()
			.unwrap()
	}
}

async fn create_location(app: &TestServer, name: &str, city: &str) -> i32 {
	let response = app
		.post("/locations")
		.json(&json!({ "name": name, "city": city }))
		.await;
	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<Location>().id
}

async fn create_field(
	app: &TestServer,
	location_id: i32,
	name: &str,
	price_per_hour_cents: i64,
) -> i32 {
	let response = app
		.post("/fields")
		.json(&json!({
			"locationId": location_id,
			"name": name,
			"pricePerHourCents": price_per_hour_cents,
			"managerId": 1,
		}))
		.await;
	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<Field>().id
}
