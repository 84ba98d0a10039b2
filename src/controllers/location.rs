use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::{Location, NewLocation};
use crate::schemas::location::CreateLocationRequest;
use crate::{DbPool, Error};

#[instrument(skip(pool))]
pub async fn create_location(
	State(pool): State<DbPool>,
	Json(request): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let location =
		NewLocation { name: request.name, city: request.city }
			.insert(&conn)
			.await?;

	Ok((StatusCode::CREATED, Json(location)))
}

#[instrument(skip(pool))]
pub async fn get_locations(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let locations = Location::get_all(&conn).await?;

	Ok((StatusCode::OK, Json(locations)))
}
