use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentLinkResponse {
	pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleSavedResponse {
	pub id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleRemovedResponse {
	pub removed: bool,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ScheduleFilter {
	pub account_id: Option<String>,
}
