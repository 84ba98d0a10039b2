use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
	#[validate(length(min = 1, max = 120))]
	pub display_name: String,
	#[validate(email)]
	pub email:        String,
}
