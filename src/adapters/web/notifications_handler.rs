use std::collections::HashMap;

use actix_web::http::header::ContentType;
use actix_web::{Either, HttpResponse, Responder, post, web};
use log::{info, warn};
use serde_json::Value;

use crate::domain::pay_service::{PayService, RESPONSE_ERROR, RESPONSE_SUCCESS};
use crate::drivers::DriverFactory;
use crate::drivers::cloudpayments_driver::CloudPaymentsDriver;

/// The provider posts form-encoded callbacks; JSON is accepted as well.
pub type NotificationBody =
	Either<web::Json<Value>, web::Form<HashMap<String, String>>>;

fn into_payload(body: NotificationBody) -> Value {
	match body {
		Either::Left(json) => json.into_inner(),
		Either::Right(form) => form
			.into_inner()
			.into_iter()
			.map(|(key, value)| (key, Value::String(value)))
			.collect::<serde_json::Map<_, _>>()
			.into(),
	}
}

fn receive(drivers: &DriverFactory, body: NotificationBody) -> (CloudPaymentsDriver, i32) {
	let payload = into_payload(body);
	let mut driver = drivers.driver();

	let accepted = driver.validate(&payload);
	driver.set_response(payload);

	let code = if accepted && !driver.order_id().is_empty() {
		RESPONSE_SUCCESS
	} else {
		warn!("Notification without an order id rejected");
		RESPONSE_ERROR
	};

	(driver, code)
}

fn ack(body: String) -> HttpResponse {
	HttpResponse::Ok().content_type(ContentType::json()).body(body)
}

#[post("/notifications/pay")]
pub async fn pay_notification(
	body: NotificationBody,
	drivers: web::Data<DriverFactory>,
) -> impl Responder {
	let (driver, code) = receive(&drivers, body);

	info!(
		"Pay notification for order {}: transaction {}, status {}, amount {}",
		driver.order_id(),
		driver.transaction_id(),
		driver.status(),
		driver.amount()
	);

	ack(driver.notification_response(code))
}

#[post("/notifications/check")]
pub async fn check_notification(
	body: NotificationBody,
	drivers: web::Data<DriverFactory>,
) -> impl Responder {
	let (driver, code) = receive(&drivers, body);

	info!(
		"Check notification for order {}, payment {}",
		driver.order_id(),
		driver.payment_id()
	);

	ack(driver.check_response(code))
}
