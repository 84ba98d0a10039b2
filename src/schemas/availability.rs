use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityWindowRequest {
	pub start_time: DateTime<Utc>,
	pub end_time:   DateTime<Utc>,
	#[validate(length(max = 500))]
	pub reason:     Option<String>,
}
