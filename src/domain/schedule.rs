use async_trait::async_trait;
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::domain::errors::DriverError;
use crate::domain::payment::CURRENCY_RUR;
use crate::domain::protocol::{ScheduleModel, ScheduleRequest};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulePeriod {
	Day,
	Week,
	#[default]
	Month,
}

impl SchedulePeriod {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"day" => Some(SchedulePeriod::Day),
			"week" => Some(SchedulePeriod::Week),
			"month" => Some(SchedulePeriod::Month),
			_ => None,
		}
	}
}

/// Recurring payment definition. An empty id means it was never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
	#[serde(default)]
	pub id:                   Option<String>,
	#[serde(default)]
	pub period:               SchedulePeriod,
	#[serde(default = "default_interval")]
	pub interval:             u32,
	#[serde(default)]
	pub max_payments:         Option<u32>,
	#[serde(default)]
	pub account_id:           String,
	#[serde(default)]
	pub description:          String,
	#[serde(default)]
	pub email:                String,
	#[serde(default)]
	pub amount:               f64,
	#[serde(default = "default_currency")]
	pub currency:             String,
	#[serde(default)]
	pub require_confirmation: bool,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub start_date:           Option<OffsetDateTime>,
	/// Saved card token, required by the provider on create.
	#[serde(default)]
	pub token:                Option<String>,
}

impl Default for Schedule {
	fn default() -> Self {
		Self {
			id:                   None,
			period:               SchedulePeriod::default(),
			interval:             default_interval(),
			max_payments:         None,
			account_id:           String::new(),
			description:          String::new(),
			email:                String::new(),
			amount:               0.0,
			currency:             default_currency(),
			require_confirmation: false,
			start_date:           None,
			token:                None,
		}
	}
}

impl Schedule {
	/// Provider id, `None` while the schedule is unsaved.
	pub fn saved_id(&self) -> Option<&str> {
		self.id.as_deref().filter(|id| !id.is_empty())
	}

	pub fn set_period(&mut self, period: SchedulePeriod, interval: u32) -> &mut Self {
		self.period = period;
		self.interval = interval;
		self
	}

	pub fn to_request(&self) -> ScheduleRequest {
		ScheduleRequest {
			token:                self.token.clone(),
			account_id:           self.account_id.clone(),
			description:          self.description.clone(),
			email:                self.email.clone(),
			amount:               self.amount,
			currency:             self.currency.clone(),
			require_confirmation: self.require_confirmation,
			start_date:           self.start_date,
			interval:             self.period.to_string(),
			period:               self.interval,
			max_periods:          self.max_payments,
		}
	}
}

impl From<ScheduleModel> for Schedule {
	fn from(model: ScheduleModel) -> Self {
		Schedule {
			id:                   Some(model.id).filter(|id| !id.is_empty()),
			period:               SchedulePeriod::parse(&model.interval)
				.unwrap_or_default(),
			interval:             model.period,
			max_payments:         model.max_periods,
			account_id:           model.account_id,
			description:          model.description,
			email:                model.email,
			amount:               model.amount,
			currency:             model.currency,
			require_confirmation: model.require_confirmation,
			start_date:           model.start_date_iso.as_deref().and_then(parse_start_date),
			token:                None,
		}
	}
}

/// Start dates come back either with an offset or as naive UTC.
fn parse_start_date(raw: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(raw, &Rfc3339)
		.ok()
		.or_else(|| {
			PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
				.ok()
				.map(PrimitiveDateTime::assume_utc)
		})
}

fn default_interval() -> u32 {
	1
}

fn default_currency() -> String {
	CURRENCY_RUR.to_string()
}

/// Recurring payments managed on the provider side.
#[async_trait]
pub trait RecurringPaymentSchedule: Send + Sync {
	fn schedule(&self) -> Schedule {
		Schedule::default()
	}

	/// Creates or updates the schedule and returns its provider id.
	async fn save_schedule(&self, schedule: &mut Schedule) -> Result<String, DriverError>;

	async fn remove_schedule(&self, id: &str) -> Result<bool, DriverError>;

	async fn get_schedule(&self, id: &str) -> Result<Schedule, DriverError>;

	async fn get_all_schedules(
		&self,
		account_id: Option<&str>,
	) -> Result<Vec<Schedule>, DriverError>;
}
