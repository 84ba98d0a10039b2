use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::{Field, FieldUpdate, NewField};
use crate::schemas::field::{
	AvailabilityQuery,
	AvailabilityResponse,
	CreateFieldRequest,
	FieldFilter,
	SlotQuery,
	UpdateFieldRequest,
};
use crate::{DbPool, Error, resolver};

#[instrument(skip(pool))]
pub async fn create_field(
	State(pool): State<DbPool>,
	Json(request): Json<CreateFieldRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let field = NewField {
		location_id:          request.location_id,
		name:                 request.name,
		description:          request.description,
		price_per_hour_cents: request.price_per_hour_cents,
		manager_id:           request.manager_id,
	}
	.insert(&conn)
	.await?;

	Ok((StatusCode::CREATED, Json(field)))
}

#[instrument(skip(pool))]
pub async fn get_fields(
	State(pool): State<DbPool>,
	Query(filter): Query<FieldFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let fields = Field::get_all(filter.location_id, &conn).await?;

	Ok((StatusCode::OK, Json(fields)))
}

#[instrument(skip(pool))]
pub async fn get_field(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let field = Field::get_by_id(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(field)))
}

#[instrument(skip(pool))]
pub async fn update_field(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Json(request): Json<UpdateFieldRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let update = FieldUpdate {
		name:                 request.name,
		description:          request.description,
		price_per_hour_cents: request.price_per_hour_cents,
		is_active:            request.is_active,
	};
	let field = update.apply(f_id, &conn).await?;

	Ok((StatusCode::OK, Json(field)))
}

/// Fields referenced by bookings are never hard-deleted; deletion
/// deactivates the field instead
#[instrument(skip(pool))]
pub async fn deactivate_field(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Field::deactivate(f_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(pool))]
pub async fn get_available_fields(
	State(pool): State<DbPool>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	if query.end <= query.start {
		return Err(Error::Validation(
			"the requested interval must end after it starts".to_string(),
		));
	}

	let conn = pool.get().await?;

	let fields = resolver::list_available_fields(
		query.location_id,
		query.start,
		query.end,
		&conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(fields)))
}

#[instrument(skip(pool))]
pub async fn get_field_availability(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	if query.end <= query.start {
		return Err(Error::Validation(
			"the requested interval must end after it starts".to_string(),
		));
	}

	let conn = pool.get().await?;

	let available =
		resolver::is_available(f_id, query.start, query.end, &conn).await?;

	Ok((StatusCode::OK, Json(AvailabilityResponse { available })))
}

#[instrument(skip(pool))]
pub async fn get_field_slots(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Query(query): Query<SlotQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let slots = resolver::daily_time_slots(f_id, query.date, &conn).await?;

	Ok((StatusCode::OK, Json(slots)))
}
