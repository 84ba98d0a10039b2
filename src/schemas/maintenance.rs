use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{MaintenanceKind, MaintenanceStatus};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMaintenanceRequest {
	#[validate(length(min = 1, max = 200))]
	pub title:                    String,
	pub kind:                     MaintenanceKind,
	pub scheduled_at:             DateTime<Utc>,
	#[validate(range(min = 1))]
	pub estimated_duration_hours: Option<i32>,
	#[validate(range(min = 0))]
	pub cost_cents:               Option<i64>,
	#[validate(length(max = 200))]
	pub performed_by:             Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceStatusRequest {
	pub status: MaintenanceStatus,
}
