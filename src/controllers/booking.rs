use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::{Booking, NewBooking, NewBookingLineItem};
use crate::schemas::booking::{
	BookingFilter,
	BookingResponse,
	CreateBookingRequest,
};
use crate::{DbPool, Error};

#[instrument(skip(pool))]
pub async fn create_booking(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let line_items = request
		.line_items
		.into_iter()
		.map(|item| NewBookingLineItem {
			description:  item.description,
			amount_cents: item.amount_cents,
		})
		.collect();

	let booking = NewBooking {
		field_id: f_id,
		customer_id: request.customer_id,
		start_time: request.start_time,
		end_time: request.end_time,
		notes: request.notes,
		line_items,
	}
	.insert(&conn)
	.await?;

	let line_items = Booking::line_items(booking.id, &conn).await?;

	Ok((StatusCode::CREATED, Json(BookingResponse { booking, line_items })))
}

#[instrument(skip(pool))]
pub async fn get_booking(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(b_id, &conn).await?;
	let line_items = Booking::line_items(b_id, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse { booking, line_items })))
}

#[instrument(skip(pool))]
pub async fn get_booking_by_code(
	State(pool): State<DbPool>,
	Path(code): Path<String>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_code(code, &conn).await?;
	let line_items = Booking::line_items(booking.id, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse { booking, line_items })))
}

#[instrument(skip(pool))]
pub async fn get_bookings_for_field(
	State(pool): State<DbPool>,
	Path(f_id): Path<i32>,
	Query(filter): Query<BookingFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let bookings = Booking::for_field(f_id, filter.date, &conn).await?;

	Ok((StatusCode::OK, Json(bookings)))
}

#[instrument(skip(pool))]
pub async fn get_bookings_for_customer(
	State(pool): State<DbPool>,
	Path(c_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let bookings = Booking::for_customer(c_id, &conn).await?;

	Ok((StatusCode::OK, Json(bookings)))
}

#[instrument(skip(pool))]
pub async fn confirm_booking(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::confirm(b_id, &conn).await?;

	Ok((StatusCode::OK, Json(booking)))
}

#[instrument(skip(pool))]
pub async fn cancel_booking(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::cancel(b_id, &conn).await?;

	Ok((StatusCode::OK, Json(booking)))
}

#[instrument(skip(pool))]
pub async fn complete_booking(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::complete(b_id, &conn).await?;

	Ok((StatusCode::OK, Json(booking)))
}

#[instrument(skip(pool))]
pub async fn no_show_booking(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::mark_no_show(b_id, &conn).await?;

	Ok((StatusCode::OK, Json(booking)))
}
