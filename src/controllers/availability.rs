use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::{AvailabilityWindow, NewAvailabilityWindow};
use crate::schemas::availability::CreateAvailabilityWindowRequest;
use crate::{DbPool, Error};

#[instrument(skip(pool))]
pub async fn create_availability_window(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Json(request): Json<CreateAvailabilityWindowRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let window = NewAvailabilityWindow {
		field_id:   f_id,
		start_time: request.start_time,
		end_time:   request.end_time,
		reason:     request.reason,
	}
	.insert(&conn)
	.await?;

	Ok((StatusCode::CREATED, Json(window)))
}

#[instrument(skip(pool))]
pub async fn get_availability_windows(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let windows = AvailabilityWindow::for_field(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(windows)))
}

#[instrument(skip(pool))]
pub async fn delete_availability_window(
	State(pool): State<DbPool>,
	Path(w_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	AvailabilityWindow::delete_by_id(w_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
