use serde::Deserialize;

use crate::drivers::cloudpayments_driver::DriverSettings;
use crate::infrastructure::protocol::http_cloudpayments_protocol::DEFAULT_API_URL;

pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub public_id:          String,
	pub secret_key:         String,
	pub account_id:         String,
	pub api_url:            String,
	pub use_widget:         bool,
	pub bind_address:       String,
	pub request_timeout_ms: u64,
	pub server_keepalive:   u64,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		Self::load_with_prefix(ENV_PREFIX)
	}

	pub fn load_with_prefix(prefix: &str) -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("account_id", "")?
			.set_default("api_url", DEFAULT_API_URL)?
			.set_default("use_widget", false)?
			.set_default("bind_address", "0.0.0.0:9999")?
			.set_default("request_timeout_ms", 5000_i64)?
			.set_default("server_keepalive", 75_i64)?
			.add_source(config::Environment::with_prefix(prefix))
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn driver_settings(&self) -> DriverSettings {
		DriverSettings {
			use_widget: self.use_widget,
			account_id: self.account_id.clone(),
		}
	}
}
