use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldRequest {
	pub location_id:          i32,
	#[validate(length(min = 1, max = 120))]
	pub name:                 String,
	#[validate(length(max = 2000))]
	pub description:          Option<String>,
	#[validate(range(min = 0))]
	pub price_per_hour_cents: i64,
	pub manager_id:           i32,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
	#[validate(length(min = 1, max = 120))]
	pub name:                 Option<String>,
	#[validate(length(max = 2000))]
	pub description:          Option<String>,
	#[validate(range(min = 0))]
	pub price_per_hour_cents: Option<i64>,
	pub is_active:            Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFilter {
	pub location_id: Option<i32>,
}

/// Query parameters for the available-field listing and the single-field
/// availability check
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
	pub start:       DateTime<Utc>,
	pub end:         DateTime<Utc>,
	pub location_id: Option<i32>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
	pub available: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
	pub date: NaiveDate,
}
