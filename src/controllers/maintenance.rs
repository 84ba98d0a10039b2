use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::{MaintenanceRecord, NewMaintenanceRecord};
use crate::schemas::maintenance::{
	ScheduleMaintenanceRequest,
	UpdateMaintenanceStatusRequest,
};
use crate::{DbPool, Error};

#[instrument(skip(pool))]
pub async fn schedule_maintenance(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Json(request): Json<ScheduleMaintenanceRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let record = NewMaintenanceRecord {
		field_id: f_id,
		title: request.title,
		kind: request.kind,
		scheduled_at: request.scheduled_at,
		estimated_duration_hours: request.estimated_duration_hours,
		cost_cents: request.cost_cents,
		performed_by: request.performed_by,
	}
	.insert(&conn)
	.await?;

	Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(pool))]
pub async fn get_maintenance_records(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let records = MaintenanceRecord::for_field(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(records)))
}

#[instrument(skip(pool))]
pub async fn update_maintenance_status(
	State(pool): State<DbPool>,
	Path(m_id): Path<i32>,
	Json(request): Json<UpdateMaintenanceStatusRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let record =
		MaintenanceRecord::update_status(m_id, request.status, &conn).await?;

	Ok((StatusCode::OK, Json(record)))
}

#[instrument(skip(pool))]
pub async fn delete_maintenance_record(
	State(pool): State<DbPool>,
	Path(m_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	MaintenanceRecord::delete_by_id(m_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
