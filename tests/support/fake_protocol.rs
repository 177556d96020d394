use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloudpayments_driver::domain::errors::ProtocolError;
use cloudpayments_driver::domain::protocol::{
	ChargeRequest, CloudPaymentsProtocol, ScheduleModel, ScheduleRequest,
	TokenChargeRequest,
};
use cloudpayments_driver::drivers::DriverFactory;
use cloudpayments_driver::drivers::cloudpayments_driver::{
	CloudPaymentsDriver, DriverSettings,
};
use serde_json::{Value, json};

pub const PAYMENT_URL: &str = "https://acs.example/3ds";
pub const ASSIGNED_ID: &str = "sc_8cf8a9338fb8ebf7202b08d09c938";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	PaymentUrl(ChargeRequest),
	ChargeByToken(TokenChargeRequest),
	NotificationResponse(Value, i32),
	CreateSchedule(ScheduleRequest),
	UpdateSchedule(String, ScheduleRequest),
	RemoveSchedule(String),
	GetSchedule(String),
	GetScheduleList(Option<String>),
}

/// In-memory protocol that records every call it receives.
pub struct RecordingProtocol {
	calls:          Mutex<Vec<Call>>,
	decline:        bool,
	schedules:      Vec<ScheduleModel>,
	token_response: Value,
}

impl RecordingProtocol {
	pub fn new() -> Self {
		Self {
			calls:          Mutex::new(Vec::new()),
			decline:        false,
			schedules:      Vec::new(),
			token_response: json!({"Success": true}),
		}
	}

	pub fn declining() -> Self {
		Self {
			decline: true,
			..Self::new()
		}
	}

	pub fn with_schedules(mut self, schedules: Vec<ScheduleModel>) -> Self {
		self.schedules = schedules;
		self
	}

	pub fn with_token_response(mut self, response: Value) -> Self {
		self.token_response = response;
		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	fn record(&self, call: Call) {
		self.calls.lock().unwrap().push(call);
	}
}

#[async_trait]
impl CloudPaymentsProtocol for RecordingProtocol {
	async fn payment_url(
		&self,
		request: &ChargeRequest,
	) -> Result<String, ProtocolError> {
		self.record(Call::PaymentUrl(request.clone()));
		if self.decline {
			return Err(ProtocolError::Declined("Insufficient funds".to_string()));
		}
		Ok(PAYMENT_URL.to_string())
	}

	async fn charge_by_token(
		&self,
		request: &TokenChargeRequest,
	) -> Result<Value, ProtocolError> {
		self.record(Call::ChargeByToken(request.clone()));
		Ok(self.token_response.clone())
	}

	fn notification_response(&self, payload: &Value, code: i32) -> String {
		self.record(Call::NotificationResponse(payload.clone(), code));
		json!({ "code": code }).to_string()
	}

	async fn create_schedule(
		&self,
		data: &ScheduleRequest,
	) -> Result<String, ProtocolError> {
		self.record(Call::CreateSchedule(data.clone()));
		Ok(ASSIGNED_ID.to_string())
	}

	async fn update_schedule(
		&self,
		id: &str,
		data: &ScheduleRequest,
	) -> Result<bool, ProtocolError> {
		self.record(Call::UpdateSchedule(id.to_string(), data.clone()));
		Ok(true)
	}

	async fn remove_schedule(&self, id: &str) -> Result<bool, ProtocolError> {
		self.record(Call::RemoveSchedule(id.to_string()));
		Ok(id == ASSIGNED_ID)
	}

	async fn get_schedule(&self, id: &str) -> Result<ScheduleModel, ProtocolError> {
		self.record(Call::GetSchedule(id.to_string()));
		self.schedules
			.iter()
			.find(|model| model.id == id)
			.cloned()
			.ok_or_else(|| ProtocolError::Rejected(format!("Subscription {id} not found")))
	}

	async fn get_schedule_list(
		&self,
		account_id: Option<&str>,
	) -> Result<Vec<ScheduleModel>, ProtocolError> {
		self.record(Call::GetScheduleList(account_id.map(str::to_string)));
		Ok(self
			.schedules
			.iter()
			.filter(|model| account_id.is_none_or(|account| model.account_id == account))
			.cloned()
			.collect())
	}
}

pub fn settings(use_widget: bool) -> DriverSettings {
	DriverSettings {
		use_widget,
		account_id: "merchant-1".to_string(),
	}
}

pub fn driver_with(
	protocol: RecordingProtocol,
	use_widget: bool,
) -> (CloudPaymentsDriver, Arc<RecordingProtocol>) {
	let protocol = Arc::new(protocol);
	let driver = CloudPaymentsDriver::new(settings(use_widget), protocol.clone());
	(driver, protocol)
}

pub fn factory_with(
	protocol: RecordingProtocol,
) -> (DriverFactory, Arc<RecordingProtocol>) {
	let protocol = Arc::new(protocol);
	let factory = DriverFactory::new(settings(false), protocol.clone());
	(factory, protocol)
}

pub fn schedule_model(id: &str, account_id: &str) -> ScheduleModel {
	ScheduleModel {
		id:                   id.to_string(),
		account_id:           account_id.to_string(),
		description:          "Monthly subscription".to_string(),
		email:                "user@example.com".to_string(),
		amount:               1.02,
		currency:             "RUB".to_string(),
		require_confirmation: true,
		start_date_iso:       Some("2014-08-09T11:49:41".to_string()),
		interval:             "Month".to_string(),
		period:               1,
		max_periods:          Some(12),
		status:               Some("Active".to_string()),
	}
}
