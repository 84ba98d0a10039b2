use axum::http::StatusCode;

mod common;

use common::{TestEnv, at};
use pitchbook::models::{MaintenanceRecord, MaintenanceStatus};
use serde_json::json;

async fn schedule(
	env: &TestEnv,
	f_id: i32,
	body: serde_json::Value,
) -> axum_test::TestResponse {
	env.app.post(&format!("/fields/{f_id}/maintenance")).json(&body).await
}

#[tokio::test(flavor = "multi_thread")]
async fn scheduled_maintenance_blocks_its_derived_interval() {
	let env = TestEnv::new().await;

	// no duration given: the default of two hours applies
	let response = schedule(
		&env,
		env.field_id,
		json!({
			"title": "pitch relining",
			"kind": "Routine",
			"scheduledAt": at(8, 0),
		}),
	)
	.await;
	assert_eq!(response.status_code(), StatusCode::CREATED);

	// blocked inside [08:00, 10:00), with no bookings involved
	assert!(!env.is_available(env.field_id, at(9, 0), at(9, 30)).await);
	// free at the derived end boundary
	assert!(env.is_available(env.field_id, at(10, 0), at(11, 0)).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn explicit_duration_is_respected() {
	let env = TestEnv::new().await;

	schedule(
		&env,
		env.field_id,
		json!({
			"title": "floodlight upgrade",
			"kind": "Upgrade",
			"scheduledAt": at(10, 0),
			"estimatedDurationHours": 3,
		}),
	)
	.await;

	assert!(!env.is_available(env.field_id, at(12, 0), at(13, 0)).await);
	assert!(env.is_available(env.field_id, at(13, 0), at(14, 0)).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn finished_maintenance_does_not_block() {
	let env = TestEnv::new().await;

	let record = schedule(
		&env,
		env.field_id,
		json!({
			"title": "goal net replacement",
			"kind": "Repair",
			"scheduledAt": at(8, 0),
		}),
	)
	.await
	.json::<MaintenanceRecord>();

	assert!(!env.is_available(env.field_id, at(8, 0), at(9, 0)).await);

	// in progress still blocks
	let response = env
		.app
		.patch(&format!("/maintenance/{}/status", record.id))
		.json(&json!({ "status": "InProgress" }))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(!env.is_available(env.field_id, at(8, 0), at(9, 0)).await);

	// completed does not, and the completion time is stamped
	let response = env
		.app
		.patch(&format!("/maintenance/{}/status", record.id))
		.json(&json!({ "status": "Completed" }))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let completed = response.json::<MaintenanceRecord>();
	assert_eq!(completed.status, MaintenanceStatus::Completed);
	assert!(completed.completed_at.is_some());

	assert!(env.is_available(env.field_id, at(8, 0), at(9, 0)).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn illegal_status_moves_are_rejected() {
	let env = TestEnv::new().await;

	let record = schedule(
		&env,
		env.field_id,
		json!({
			"title": "drainage inspection",
			"kind": "Inspection",
			"scheduledAt": at(8, 0),
		}),
	)
	.await
	.json::<MaintenanceRecord>();

	env.app
		.patch(&format!("/maintenance/{}/status", record.id))
		.json(&json!({ "status": "Cancelled" }))
		.await;

	// cancelled records are terminal
	let response = env
		.app
		.patch(&format!("/maintenance/{}/status", record.id))
		.json(&json!({ "status": "InProgress" }))
		.await;
	assert_eq!(response.status_code(), StatusCode::CONFLICT);

	// and no longer block
	assert!(env.is_available(env.field_id, at(8, 0), at(9, 0)).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_record_frees_the_interval() {
	let env = TestEnv::new().await;

	let record = schedule(
		&env,
		env.field_id,
		json!({
			"title": "deep clean",
			"kind": "Cleaning",
			"scheduledAt": at(8, 0),
			"performedBy": "GreenTurf BV",
		}),
	)
	.await
	.json::<MaintenanceRecord>();

	let listed = env
		.app
		.get(&format!("/fields/{}/maintenance", env.field_id))
		.await
		.json::<Vec<MaintenanceRecord>>();
	assert_eq!(listed.len(), 1);

	let response =
		env.app.delete(&format!("/maintenance/{}", record.id)).await;
	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	assert!(env.is_available(env.field_id, at(8, 0), at(9, 0)).await);

	let response =
		env.app.delete(&format!("/maintenance/{}", record.id)).await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_schedules_are_rejected() {
	let env = TestEnv::new().await;

	let response = schedule(
		&env,
		env.field_id,
		json!({
			"title": "pitch relining",
			"kind": "Routine",
			"scheduledAt": at(8, 0),
			"estimatedDurationHours": 0,
		}),
	)
	.await;
	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

	let response = schedule(
		&env,
		999_999,
		json!({
			"title": "pitch relining",
			"kind": "Routine",
			"scheduledAt": at(8, 0),
		}),
	)
	.await;
	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
