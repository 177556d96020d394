pub mod cloudpayments_driver;

use std::sync::Arc;

use crate::domain::protocol::CloudPaymentsProtocol;
use crate::drivers::cloudpayments_driver::{CloudPaymentsDriver, DriverSettings};

/// Builds a fresh driver per request around a shared protocol.
#[derive(Clone)]
pub struct DriverFactory {
	settings: DriverSettings,
	protocol: Arc<dyn CloudPaymentsProtocol>,
}

impl DriverFactory {
	pub fn new(
		settings: DriverSettings,
		protocol: Arc<dyn CloudPaymentsProtocol>,
	) -> Self {
		Self { settings, protocol }
	}

	pub fn driver(&self) -> CloudPaymentsDriver {
		CloudPaymentsDriver::new(self.settings.clone(), self.protocol.clone())
	}
}
