use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::NewCustomer;
use crate::schemas::customer::CreateCustomerRequest;
use crate::{DbPool, Error};

#[instrument(skip(pool))]
pub async fn create_customer(
	State(pool): State<DbPool>,
	Json(request): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let customer = NewCustomer {
		display_name: request.display_name,
		email:        request.email,
	}
	.insert(&conn)
	.await?;

	Ok((StatusCode::CREATED, Json(customer)))
}
