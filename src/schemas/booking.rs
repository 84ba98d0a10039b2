use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Booking, BookingLineItem};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub customer_id: i32,
	pub start_time:  DateTime<Utc>,
	pub end_time:    DateTime<Utc>,
	#[validate(length(max = 2000))]
	pub notes:       Option<String>,
	#[serde(default)]
	#[validate(nested)]
	pub line_items:  Vec<LineItemRequest>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
	#[validate(length(min = 1, max = 200))]
	pub description:  String,
	#[validate(range(min = 0))]
	pub amount_cents: i64,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
	pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
	#[serde(flatten)]
	pub booking:    Booking,
	pub line_items: Vec<BookingLineItem>,
}
