use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
	#[validate(length(min = 1, max = 120))]
	pub name: String,
	#[validate(length(min = 1, max = 120))]
	pub city: String,
}
