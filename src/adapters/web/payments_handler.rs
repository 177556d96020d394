use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError, get, post, web};
use log::{info, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PaymentLinkResponse;
use crate::domain::pay_service::PayService;
use crate::domain::payment::PaymentRequest;
use crate::drivers::DriverFactory;

const CLIENT_IP_HEADER: &str = "Client-IP";

/// Payer address from the inbound request, used when the caller sends none.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
	req.headers()
		.get(CLIENT_IP_HEADER)
		.and_then(|value| value.to_str().ok())
		.map(str::to_string)
		.or_else(|| req.connection_info().peer_addr().map(str::to_string))
}

#[post("/payments")]
pub async fn payments(
	req: HttpRequest,
	payload: web::Json<PaymentRequest>,
	drivers: web::Data<DriverFactory>,
) -> impl Responder {
	let driver = drivers.driver().with_client_ip(client_ip(&req));

	match driver.get_payment_link(&payload).await {
		Ok(url) => {
			info!("Payment link issued for order {}", payload.order_id);
			HttpResponse::Ok().json(PaymentLinkResponse { url })
		}
		Err(e) => {
			warn!("Error creating payment link for {}: {e}", payload.order_id);
			ApiError::from(e).error_response()
		}
	}
}

#[get("/options")]
pub async fn options(drivers: web::Data<DriverFactory>) -> impl Responder {
	HttpResponse::Ok().json(drivers.driver().options())
}
