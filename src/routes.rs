use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::availability::{
	create_availability_window,
	delete_availability_window,
	get_availability_windows,
};
use crate::controllers::booking::{
	cancel_booking,
	complete_booking,
	confirm_booking,
	create_booking,
	get_booking,
	get_booking_by_code,
	get_bookings_for_customer,
	get_bookings_for_field,
	no_show_booking,
};
use crate::controllers::customer::create_customer;
use crate::controllers::field::{
	create_field,
	deactivate_field,
	get_available_fields,
	get_field,
	get_field_availability,
	get_field_slots,
	get_fields,
	update_field,
};
use crate::controllers::healthcheck;
use crate::controllers::location::{create_location, get_locations};
use crate::controllers::maintenance::{
	delete_maintenance_record,
	get_maintenance_records,
	schedule_maintenance,
	update_maintenance_status,
};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/locations", location_routes())
		.nest("/fields", field_routes())
		.nest("/bookings", booking_routes())
		.nest("/customers", customer_routes())
		.route(
			"/availability-windows/{id}",
			delete(delete_availability_window),
		)
		.route("/maintenance/{id}/status", patch(update_maintenance_status))
		.route("/maintenance/{id}", delete(delete_maintenance_record));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Location routes
fn location_routes() -> Router<AppState> {
	Router::new().route("/", post(create_location).get(get_locations))
}

/// Field routes, including the slot resolver queries
fn field_routes() -> Router<AppState> {
	Router::new()
		.route("/", post(create_field).get(get_fields))
		.route("/available", get(get_available_fields))
		.route(
			"/{id}",
			get(get_field).patch(update_field).delete(deactivate_field),
		)
		.route("/{id}/availability", get(get_field_availability))
		.route("/{id}/slots", get(get_field_slots))
		.route(
			"/{id}/bookings",
			post(create_booking).get(get_bookings_for_field),
		)
		.route(
			"/{id}/availability-windows",
			post(create_availability_window).get(get_availability_windows),
		)
		.route(
			"/{id}/maintenance",
			post(schedule_maintenance).get(get_maintenance_records),
		)
}

/// Booking routes
fn booking_routes() -> Router<AppState> {
	Router::new()
		.route("/{id}", get(get_booking))
		.route("/code/{code}", get(get_booking_by_code))
		.route("/{id}/confirm", post(confirm_booking))
		.route("/{id}/cancel", post(cancel_booking))
		.route("/{id}/complete", post(complete_booking))
		.route("/{id}/no-show", post(no_show_booking))
}

/// Customer routes
fn customer_routes() -> Router<AppState> {
	Router::new()
		.route("/", post(create_customer))
		.route("/{id}/bookings", get(get_bookings_for_customer))
}
