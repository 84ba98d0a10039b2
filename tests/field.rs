use axum::http::StatusCode;

mod common;

use common::{TestEnv, at};
use pitchbook::models::Field;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn create_and_fetch_a_field() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/fields")
		.json(&json!({
			"locationId": env.location_id,
			"name": "Pitch D",
			"description": "artificial turf, floodlit",
			"pricePerHourCents": 65_00,
			"managerId": 1,
		}))
		.await;
	assert_eq!(response.status_code(), StatusCode::CREATED);

	let created = response.json::<Field>();
	assert!(created.is_active);
	assert_eq!(created.price_per_hour_cents, 65_00);

	let fetched = env
		.app
		.get(&format!("/fields/{}", created.id))
		.await
		.json::<Field>();
	assert_eq!(fetched.id, created.id);
	assert_eq!(fetched.name, "Pitch D");
}

#[tokio::test(flavor = "multi_thread")]
async fn field_listing_filters_by_location() {
	let env = TestEnv::new().await;

	// the seeded set: three fields in the first location, one in the second
	let all = env.app.get("/fields").await.json::<Vec<Field>>();
	assert_eq!(all.len(), 4);

	let filtered = env
		.app
		.get(&format!("/fields?locationId={}", env.second_location_id))
		.await
		.json::<Vec<Field>>();
	assert_eq!(filtered.len(), 1);
	assert_eq!(filtered[0].id, env.remote_field_id);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_the_given_fields() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.patch(&format!("/fields/{}", env.field_id))
		.json(&json!({ "pricePerHourCents": 80_00 }))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let updated = response.json::<Field>();
	assert_eq!(updated.price_per_hour_cents, 80_00);
	assert_eq!(updated.name, "Pitch A");
	assert!(updated.is_active);
}

#[tokio::test(flavor = "multi_thread")]
async fn reactivating_a_field_reopens_it() {
	let env = TestEnv::new().await;

	assert!(!env.is_available(env.inactive_field_id, at(8, 0), at(9, 0)).await);

	let response = env
		.app
		.patch(&format!("/fields/{}", env.inactive_field_id))
		.json(&json!({ "isActive": true }))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	assert!(env.is_available(env.inactive_field_id, at(8, 0), at(9, 0)).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivated_fields_reject_bookings() {
	let env = TestEnv::new().await;

	let response = env.app.delete(&format!("/fields/{}", env.field_id)).await;
	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	// the row itself survives for its booking history
	let fetched = env
		.app
		.get(&format!("/fields/{}", env.field_id))
		.await
		.json::<Field>();
	assert!(!fetched.is_active);

	let response = env.request_booking(env.field_id, at(8, 0), at(9, 0)).await;
	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_fields_are_not_found() {
	let env = TestEnv::new().await;

	let response = env.app.get("/fields/999999").await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env
		.app
		.patch("/fields/999999")
		.json(&json!({ "name": "ghost" }))
		.await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env.app.delete("/fields/999999").await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_fields_are_rejected() {
	let env = TestEnv::new().await;

	// empty name
	let response = env
		.app
		.post("/fields")
		.json(&json!({
			"locationId": env.location_id,
			"name": "",
			"pricePerHourCents": 50_00,
			"managerId": 1,
		}))
		.await;
	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

	// negative price
	let response = env
		.app
		.post("/fields")
		.json(&json!({
			"locationId": env.location_id,
			"name": "Pitch E",
			"pricePerHourCents": -1,
			"managerId": 1,
		}))
		.await;
	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
