use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::domain::errors::ProtocolError;
use crate::domain::payment::ExtraParams;

/// Charge by card cryptogram (`/payments/cards/charge`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ChargeRequest {
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub email:                  Option<String>,
	pub amount:                 f64,
	pub currency:               String,
	pub invoice_id:             String,
	pub description:            String,
	pub account_id:             String,
	pub name:                   String,
	pub card_cryptogram_packet: String,
	pub ip_address:             String,
	pub json_data:              ExtraParams,
	/// Where the payer lands when no further authentication is needed.
	#[serde(skip)]
	pub success_url:            String,
}

/// Charge by a saved card token (`/payments/tokens/charge`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TokenChargeRequest {
	pub amount:      f64,
	pub currency:    String,
	pub account_id:  String,
	pub token:       String,
	pub invoice_id:  String,
	pub description: String,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub email:       Option<String>,
	pub json_data:   ExtraParams,
}

/// Subscription body sent on create and update.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleRequest {
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub token:                Option<String>,
	pub account_id:           String,
	pub description:          String,
	pub email:                String,
	pub amount:               f64,
	pub currency:             String,
	pub require_confirmation: bool,
	#[serde(
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none",
		default
	)]
	pub start_date:           Option<OffsetDateTime>,
	pub interval:             String,
	pub period:               u32,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub max_periods:          Option<u32>,
}

/// Subscription as the provider returns it. Absent and `null` fields both
/// fall back to their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduleModel {
	#[serde(deserialize_with = "null_as_default")]
	pub id:                   String,
	#[serde(deserialize_with = "null_as_default")]
	pub account_id:           String,
	#[serde(deserialize_with = "null_as_default")]
	pub description:          String,
	#[serde(deserialize_with = "null_as_default")]
	pub email:                String,
	#[serde(deserialize_with = "null_as_default")]
	pub amount:               f64,
	#[serde(deserialize_with = "null_as_default")]
	pub currency:             String,
	#[serde(deserialize_with = "null_as_default")]
	pub require_confirmation: bool,
	pub start_date_iso:       Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub interval:             String,
	#[serde(deserialize_with = "null_as_default")]
	pub period:               u32,
	pub max_periods:          Option<u32>,
	pub status:               Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wire-level operations against the provider.
#[async_trait]
pub trait CloudPaymentsProtocol: Send + Sync + 'static {
	/// Submits a cryptogram charge and returns the URL the payer goes to next.
	async fn payment_url(&self, request: &ChargeRequest)
	-> Result<String, ProtocolError>;

	/// Charges a saved token and returns the raw provider response.
	async fn charge_by_token(
		&self,
		request: &TokenChargeRequest,
	) -> Result<Value, ProtocolError>;

	/// Body the provider expects in reply to a notification.
	fn notification_response(&self, payload: &Value, code: i32) -> String;

	async fn create_schedule(
		&self,
		data: &ScheduleRequest,
	) -> Result<String, ProtocolError>;

	async fn update_schedule(
		&self,
		id: &str,
		data: &ScheduleRequest,
	) -> Result<bool, ProtocolError>;

	async fn remove_schedule(&self, id: &str) -> Result<bool, ProtocolError>;

	async fn get_schedule(&self, id: &str) -> Result<ScheduleModel, ProtocolError>;

	async fn get_schedule_list(
		&self,
		account_id: Option<&str>,
	) -> Result<Vec<ScheduleModel>, ProtocolError>;
}
