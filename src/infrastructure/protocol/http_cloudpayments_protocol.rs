use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::errors::ProtocolError;
use crate::domain::protocol::{
	ChargeRequest, CloudPaymentsProtocol, ScheduleModel, ScheduleRequest,
	TokenChargeRequest,
};

pub const DEFAULT_API_URL: &str = "https://api.cloudpayments.ru";

const CARD_CHARGE_PATH: &str = "/payments/cards/charge";
const TOKEN_CHARGE_PATH: &str = "/payments/tokens/charge";
const SUBSCRIPTION_CREATE_PATH: &str = "/subscriptions/create";
const SUBSCRIPTION_UPDATE_PATH: &str = "/subscriptions/update";
const SUBSCRIPTION_CANCEL_PATH: &str = "/subscriptions/cancel";
const SUBSCRIPTION_GET_PATH: &str = "/subscriptions/get";
const SUBSCRIPTION_FIND_PATH: &str = "/subscriptions/find";

/// `{Success, Message, Model}` wrapper around every API answer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope {
	#[serde(default)]
	success: bool,
	message: Option<String>,
	model:   Option<Value>,
}

impl Envelope {
	fn parse(raw: Value) -> Result<Self, ProtocolError> {
		serde_json::from_value(raw)
			.map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
	}

	fn accepted(self) -> Result<Option<Value>, ProtocolError> {
		if self.success {
			Ok(self.model)
		} else {
			Err(ProtocolError::Rejected(
				self.message
					.unwrap_or_else(|| "no message from provider".to_string()),
			))
		}
	}

	fn model_str(&self, key: &str) -> Option<String> {
		self.model
			.as_ref()
			.and_then(|model| model.get(key))
			.and_then(Value::as_str)
			.filter(|value| !value.is_empty())
			.map(str::to_string)
	}
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScheduleUpdate<'a> {
	id:   &'a str,
	#[serde(flatten)]
	data: &'a ScheduleRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScheduleId<'a> {
	id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleFilter<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	account_id: Option<&'a str>,
}

/// CloudPayments REST API over reqwest, authenticated with the public id
/// and API secret.
#[derive(Clone)]
pub struct HttpCloudPaymentsProtocol {
	http_client: Client,
	base_url:    String,
	public_id:   String,
	secret_key:  String,
}

impl HttpCloudPaymentsProtocol {
	pub fn new(
		http_client: Client,
		base_url: impl Into<String>,
		public_id: impl Into<String>,
		secret_key: impl Into<String>,
	) -> Self {
		Self {
			http_client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			public_id: public_id.into(),
			secret_key: secret_key.into(),
		}
	}

	pub fn with_timeout(
		timeout: Duration,
		base_url: impl Into<String>,
		public_id: impl Into<String>,
		secret_key: impl Into<String>,
	) -> Result<Self, ProtocolError> {
		let http_client = Client::builder().timeout(timeout).build()?;
		Ok(Self::new(http_client, base_url, public_id, secret_key))
	}

	async fn post<B: Serialize + ?Sized>(
		&self,
		path: &str,
		body: &B,
	) -> Result<Value, ProtocolError> {
		let url = format!("{}{path}", self.base_url);
		debug!("POST {url}");

		let resp = self
			.http_client
			.post(&url)
			.basic_auth(&self.public_id, Some(&self.secret_key))
			.json(body)
			.send()
			.await?
			.error_for_status()
			.inspect_err(|e| error!("Provider call to {path} failed: {e}"))?;

		resp.json::<Value>()
			.await
			.map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
	}

	async fn call<B: Serialize + ?Sized>(
		&self,
		path: &str,
		body: &B,
	) -> Result<Envelope, ProtocolError> {
		Envelope::parse(self.post(path, body).await?)
	}
}

fn schedule_model(model: Value) -> Result<ScheduleModel, ProtocolError> {
	serde_json::from_value(model)
		.map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl CloudPaymentsProtocol for HttpCloudPaymentsProtocol {
	async fn payment_url(
		&self,
		request: &ChargeRequest,
	) -> Result<String, ProtocolError> {
		let envelope = self.call(CARD_CHARGE_PATH, request).await?;

		if envelope.success {
			return Ok(request.success_url.clone());
		}

		if let Some(acs_url) = envelope.model_str("AcsUrl") {
			debug!("Charge for {} needs 3-D Secure", request.invoice_id);
			return Ok(acs_url);
		}

		let reason = envelope
			.model_str("CardHolderMessage")
			.or(envelope.message)
			.unwrap_or_else(|| "declined by provider".to_string());
		warn!("Charge for {} declined: {reason}", request.invoice_id);

		Err(ProtocolError::Declined(reason))
	}

	async fn charge_by_token(
		&self,
		request: &TokenChargeRequest,
	) -> Result<Value, ProtocolError> {
		self.post(TOKEN_CHARGE_PATH, request).await
	}

	fn notification_response(&self, _payload: &Value, code: i32) -> String {
		json!({ "code": code }).to_string()
	}

	async fn create_schedule(
		&self,
		data: &ScheduleRequest,
	) -> Result<String, ProtocolError> {
		let envelope = self.call(SUBSCRIPTION_CREATE_PATH, data).await?;
		let id = envelope.model_str("Id");

		envelope.accepted()?;
		id.ok_or_else(|| {
			ProtocolError::MalformedResponse("subscription id is missing".to_string())
		})
	}

	async fn update_schedule(
		&self,
		id: &str,
		data: &ScheduleRequest,
	) -> Result<bool, ProtocolError> {
		let envelope = self
			.call(SUBSCRIPTION_UPDATE_PATH, &ScheduleUpdate { id, data })
			.await?;

		Ok(envelope.success)
	}

	async fn remove_schedule(&self, id: &str) -> Result<bool, ProtocolError> {
		let envelope = self
			.call(SUBSCRIPTION_CANCEL_PATH, &ScheduleId { id })
			.await?;

		Ok(envelope.success)
	}

	async fn get_schedule(&self, id: &str) -> Result<ScheduleModel, ProtocolError> {
		let model = self
			.call(SUBSCRIPTION_GET_PATH, &ScheduleId { id })
			.await?
			.accepted()?
			.ok_or_else(|| {
				ProtocolError::MalformedResponse(format!("subscription {id} has no model"))
			})?;

		schedule_model(model)
	}

	async fn get_schedule_list(
		&self,
		account_id: Option<&str>,
	) -> Result<Vec<ScheduleModel>, ProtocolError> {
		let model = self
			.call(SUBSCRIPTION_FIND_PATH, &ScheduleFilter { account_id })
			.await?
			.accepted()?;

		match model {
			Some(Value::Array(items)) => items.into_iter().map(schedule_model).collect(),
			None | Some(Value::Null) => Ok(Vec::new()),
			Some(other) => Err(ProtocolError::MalformedResponse(format!(
				"expected a subscription list, got {other}"
			))),
		}
	}
}
