use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CURRENCY_RUR: &str = "RUB";
pub const PAYMENT_TYPE_CARD: &str = "card";

/// Provider-specific parameters passed alongside a payment.
pub type ExtraParams = Map<String, Value>;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRequest {
	pub order_id:     String,
	pub payment_id:   String,
	pub amount:       f64,
	#[serde(default = "default_currency")]
	pub currency:     String,
	#[serde(default = "default_payment_type")]
	pub payment_type: String,
	#[serde(default)]
	pub success_url:  String,
	#[serde(default)]
	pub fail_url:     String,
	#[serde(default)]
	pub description:  String,
	#[serde(default)]
	pub extra_params: ExtraParams,
	#[serde(default)]
	pub receipt:      Option<Receipt>,
}

impl PaymentRequest {
	pub fn new(
		order_id: impl Into<String>,
		payment_id: impl Into<String>,
		amount: f64,
	) -> Self {
		Self {
			order_id: order_id.into(),
			payment_id: payment_id.into(),
			amount,
			currency: default_currency(),
			payment_type: default_payment_type(),
			success_url: String::new(),
			fail_url: String::new(),
			description: String::new(),
			extra_params: ExtraParams::new(),
			receipt: None,
		}
	}

	pub fn with_return_urls(
		mut self,
		success_url: impl Into<String>,
		fail_url: impl Into<String>,
	) -> Self {
		self.success_url = success_url.into();
		self.fail_url = fail_url.into();
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn with_extra_param(
		mut self,
		name: impl Into<String>,
		value: impl Into<Value>,
	) -> Self {
		self.extra_params.insert(name.into(), value.into());
		self
	}

	/// Extra parameter as a string, `None` when absent or null.
	pub fn extra_str(&self, name: &str) -> Option<String> {
		match self.extra_params.get(name)? {
			Value::Null => None,
			Value::String(s) => Some(s.clone()),
			other => Some(other.to_string()),
		}
	}
}

/// Fiscal receipt attached to a payment. Not sent by every driver.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Receipt {
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub items: Vec<ReceiptItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReceiptItem {
	pub name:     String,
	pub quantity: f64,
	pub price:    f64,
}

/// Hosted payment form. Empty for drivers that never redirect through a form.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Form {
	pub action: String,
	pub method: String,
	pub fields: Vec<(String, String)>,
}

impl Form {
	pub fn is_empty(&self) -> bool {
		self.action.is_empty() && self.fields.is_empty()
	}
}

fn default_currency() -> String {
	CURRENCY_RUR.to_string()
}

fn default_payment_type() -> String {
	PAYMENT_TYPE_CARD.to_string()
}
