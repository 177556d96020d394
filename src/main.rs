use std::sync::Arc;

use cloudpayments_driver::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Arc::new(
		cloudpayments_driver::config::Config::load()
			.expect("Failed to load configuration"),
	);
	run(config).await
}
