use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::errors::DriverError;
use crate::domain::notification::Notification;
use crate::domain::pay_service::{
	PayService, PayServiceOption, RESPONSE_ERROR, RESPONSE_SUCCESS,
};
use crate::domain::payment::{Form, PAYMENT_TYPE_CARD, PaymentRequest};
use crate::domain::protocol::{
	ChargeRequest, CloudPaymentsProtocol, TokenChargeRequest,
};
use crate::domain::schedule::{RecurringPaymentSchedule, Schedule};

pub const PAYMENT_CLOUDPAYMENTS: &str = "cloudpayments";

const CHECKOUT_PARAM: &str = "checkout";
const CARDHOLDER_NAME_PARAM: &str = "cardholder_name";
const PAN_MASK: &str = "******";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DriverSettings {
	/// The client renders the provider widget, no server-side charge.
	#[serde(default)]
	pub use_widget: bool,
	#[serde(default)]
	pub account_id: String,
}

/// CloudPayments implementation of the pay service and recurring schedule
/// contracts. One instance serves one request or notification.
pub struct CloudPaymentsDriver {
	settings:  DriverSettings,
	protocol:  Arc<dyn CloudPaymentsProtocol>,
	response:  Notification,
	client_ip: Option<String>,
}

impl CloudPaymentsDriver {
	pub fn new(
		settings: DriverSettings,
		protocol: Arc<dyn CloudPaymentsProtocol>,
	) -> Self {
		Self {
			settings,
			protocol,
			response: Notification::default(),
			client_ip: None,
		}
	}

	/// Fallback payer IP taken from the inbound request.
	pub fn with_client_ip(mut self, client_ip: Option<String>) -> Self {
		self.client_ip = client_ip;
		self
	}

	pub fn use_widget(&self) -> bool {
		self.settings.use_widget
	}

	pub fn account_id(&self) -> &str {
		&self.settings.account_id
	}

	pub fn response(&self) -> &Notification {
		&self.response
	}

	/// Charges a saved card token. The synchronous response replaces the
	/// stored notification, so the accessors read it afterwards.
	pub async fn pay_by_token(
		&mut self,
		request: &PaymentRequest,
		token: &str,
	) -> Result<bool, DriverError> {
		let charge = TokenChargeRequest {
			amount:      request.amount,
			currency:    request.currency.clone(),
			account_id:  self.settings.account_id.clone(),
			token:       token.to_string(),
			invoice_id:  request.order_id.clone(),
			description: request.description.clone(),
			email:       request.extra_str("email"),
			json_data:   Self::json_data(request),
		};

		let response = self.protocol.charge_by_token(&charge).await?;
		self.set_response(response);

		debug!(
			"Token charge for order {} finished, success: {}",
			request.order_id,
			self.is_success()
		);

		Ok(self.is_success())
	}

	fn json_data(request: &PaymentRequest) -> serde_json::Map<String, Value> {
		let mut data = request.extra_params.clone();
		data.insert(
			"PaymentId".to_string(),
			Value::String(request.payment_id.clone()),
		);
		data
	}

	fn required_param(
		request: &PaymentRequest,
		name: &str,
	) -> Result<String, DriverError> {
		request
			.extra_str(name)
			.ok_or_else(|| DriverError::MissingParameter(name.to_string()))
	}

	/// Translates an application response code to the provider's one.
	fn map_error(error_code: i32) -> i32 {
		match error_code {
			RESPONSE_SUCCESS => 0,
			RESPONSE_ERROR => 1,
			_ => Self::map_error(RESPONSE_ERROR),
		}
	}
}

#[async_trait]
impl PayService for CloudPaymentsDriver {
	fn name(&self) -> &'static str {
		PAYMENT_CLOUDPAYMENTS
	}

	async fn get_payment_link(
		&self,
		request: &PaymentRequest,
	) -> Result<String, DriverError> {
		if self.use_widget() {
			return Ok(request.success_url.clone());
		}

		let checkout = Self::required_param(request, CHECKOUT_PARAM)?;
		let cardholder_name = Self::required_param(request, CARDHOLDER_NAME_PARAM)?;

		let charge = ChargeRequest {
			email: request.extra_str("email"),
			amount: request.amount,
			currency: request.currency.clone(),
			invoice_id: request.order_id.clone(),
			description: request.description.clone(),
			account_id: self.settings.account_id.clone(),
			name: cardholder_name,
			card_cryptogram_packet: checkout,
			ip_address: request
				.extra_str("ip")
				.or_else(|| self.client_ip.clone())
				.unwrap_or_default(),
			json_data: Self::json_data(request),
			success_url: request.success_url.clone(),
		};

		debug!("Submitting cryptogram charge for order {}", request.order_id);

		Ok(self.protocol.payment_url(&charge).await?)
	}

	fn need_form(&self) -> bool {
		false
	}

	fn get_payment_form(&self, _request: &PaymentRequest) -> Form {
		Form::default()
	}

	// Signatures are not checked here; callers own the trust boundary.
	fn validate(&self, _data: &Value) -> bool {
		true
	}

	fn set_response(&mut self, payload: Value) -> &mut Self {
		self.response = Notification::new(payload);
		self
	}

	fn param(&self, name: &str) -> Option<Value> {
		self.response.get(name).cloned()
	}

	fn order_id(&self) -> String {
		self.response.string_or(&["Model.InvoiceId", "InvoiceId"], "")
	}

	fn payment_id(&self) -> String {
		self.response
			.structure(&["Model.JsonData", "Data"])
			.map(Notification::new)
			.map(|data| data.string_or(&["PaymentId"], ""))
			.unwrap_or_default()
	}

	fn status(&self) -> String {
		self.response.string_or(&["Model.Status", "Status"], "")
	}

	fn is_success(&self) -> bool {
		self.response.flag_or(&["Success"], true)
	}

	fn transaction_id(&self) -> String {
		self.response
			.string_or(&["Model.TransactionId", "TransactionId"], "")
	}

	fn amount(&self) -> f64 {
		self.response.number_or(&["Model.Amount", "Amount"], 0.0)
	}

	fn error_code(&self) -> String {
		self.response.string_or(&["Model.Message"], "")
	}

	fn provider(&self) -> &'static str {
		PAYMENT_TYPE_CARD
	}

	fn pan(&self) -> String {
		format!(
			"{}{PAN_MASK}{}",
			self.response
				.string_or(&["Model.CardFirstSix", "CardFirstSix"], ""),
			self.response
				.string_or(&["Model.CardLastFour", "CardLastFour"], "")
		)
	}

	fn date_time(&self) -> String {
		self.response
			.string_or(&["Model.CreatedDateIso", "CreatedDateIso"], "")
	}

	fn last_error(&self) -> i32 {
		0
	}

	fn notification_response(&self, error_code: i32) -> String {
		self.protocol
			.notification_response(self.response.payload(), Self::map_error(error_code))
	}

	// Same body as the notification reply for now; the check flow is kept
	// separate in case the provider starts expecting a different one.
	fn check_response(&self, error_code: i32) -> String {
		self.protocol
			.notification_response(self.response.payload(), Self::map_error(error_code))
	}

	fn options(&self) -> Vec<PayServiceOption> {
		vec![
			PayServiceOption::string("Public Id", "publicId"),
			PayServiceOption::string("Secret key", "secretKey"),
		]
	}
}

#[async_trait]
impl RecurringPaymentSchedule for CloudPaymentsDriver {
	async fn save_schedule(&self, schedule: &mut Schedule) -> Result<String, DriverError> {
		let request = schedule.to_request();

		if let Some(id) = schedule.saved_id() {
			let id = id.to_string();
			if !self.protocol.update_schedule(&id, &request).await? {
				warn!("Provider did not confirm update of schedule {id}");
			}
			info!("Schedule {id} updated");
			return Ok(id);
		}

		let id = self.protocol.create_schedule(&request).await?;
		info!("Schedule {id} created for account {}", schedule.account_id);
		schedule.id = Some(id.clone());

		Ok(id)
	}

	async fn remove_schedule(&self, id: &str) -> Result<bool, DriverError> {
		Ok(self.protocol.remove_schedule(id).await?)
	}

	async fn get_schedule(&self, id: &str) -> Result<Schedule, DriverError> {
		Ok(self.protocol.get_schedule(id).await?.into())
	}

	async fn get_all_schedules(
		&self,
		account_id: Option<&str>,
	) -> Result<Vec<Schedule>, DriverError> {
		let schedules = self.protocol.get_schedule_list(account_id).await?;

		Ok(schedules.into_iter().map(Schedule::from).collect())
	}
}
