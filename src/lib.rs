use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;

pub mod adapters;
pub mod config;
pub mod domain;
pub mod drivers;
pub mod infrastructure;

use crate::adapters::web::{notifications_handler, payments_handler, schedules_handler};
use crate::config::Config;
use crate::drivers::DriverFactory;
use crate::infrastructure::protocol::http_cloudpayments_protocol::HttpCloudPaymentsProtocol;

/// Registers every endpoint the service exposes.
pub fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(payments_handler::payments)
		.service(payments_handler::options)
		.service(notifications_handler::pay_notification)
		.service(notifications_handler::check_notification)
		.service(schedules_handler::save_schedule)
		.service(schedules_handler::list_schedules)
		.service(schedules_handler::get_schedule)
		.service(schedules_handler::remove_schedule);
}

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	env_logger::init();

	let protocol = HttpCloudPaymentsProtocol::with_timeout(
		Duration::from_millis(config.request_timeout_ms),
		config.api_url.clone(),
		config.public_id.clone(),
		config.secret_key.clone(),
	)
	.map_err(std::io::Error::other)?;

	let drivers = DriverFactory::new(config.driver_settings(), Arc::new(protocol));

	info!(
		"Starting Actix-Web server on {} (widget mode: {})...",
		config.bind_address, config.use_widget
	);
	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(drivers.clone()))
			.configure(routes)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind(config.bind_address.as_str())?
	.run()
	.await
}
