use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::DriverError;
use crate::domain::payment::{Form, PaymentRequest};

pub const RESPONSE_SUCCESS: i32 = 1;
pub const RESPONSE_ERROR: i32 = 2;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
	String,
}

/// Setting a pay service needs, described for a generic settings UI.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PayServiceOption {
	#[serde(rename = "type")]
	pub option_type: OptionType,
	pub label:       String,
	pub alias:       String,
}

impl PayServiceOption {
	pub fn string(label: &str, alias: &str) -> Self {
		Self {
			option_type: OptionType::String,
			label:       label.to_string(),
			alias:       alias.to_string(),
		}
	}
}

/// Generic payment service contract shared by every provider driver.
#[async_trait]
pub trait PayService: Send + Sync {
	fn name(&self) -> &'static str;

	async fn get_payment_link(
		&self,
		request: &PaymentRequest,
	) -> Result<String, DriverError>;

	fn need_form(&self) -> bool;

	fn get_payment_form(&self, request: &PaymentRequest) -> Form;

	fn validate(&self, data: &Value) -> bool;

	fn set_response(&mut self, payload: Value) -> &mut Self
	where
		Self: Sized;

	fn param(&self, name: &str) -> Option<Value>;

	fn order_id(&self) -> String;

	fn payment_id(&self) -> String;

	fn status(&self) -> String;

	fn is_success(&self) -> bool;

	fn transaction_id(&self) -> String;

	fn amount(&self) -> f64;

	fn error_code(&self) -> String;

	fn provider(&self) -> &'static str;

	fn pan(&self) -> String;

	fn date_time(&self) -> String;

	fn last_error(&self) -> i32;

	/// Reply body for an asynchronous payment notification.
	fn notification_response(&self, error_code: i32) -> String;

	/// Reply body for a pre-payment check request.
	fn check_response(&self, error_code: i32) -> String;

	fn options(&self) -> Vec<PayServiceOption>;
}
