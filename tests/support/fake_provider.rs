use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

pub const PUBLIC_ID: &str = "pk_test";
pub const SECRET_KEY: &str = "secret";

/// CloudPayments stand-in served on an ephemeral local port.
pub struct FakeProvider {
	pub url: String,
	handle:  ServerHandle,
}

impl FakeProvider {
	pub async fn stop(self) {
		self.handle.stop(true).await;
	}
}

pub async fn start_fake_provider() -> FakeProvider {
	let server = HttpServer::new(|| {
		App::new()
			.route("/payments/cards/charge", web::post().to(card_charge))
			.route("/payments/tokens/charge", web::post().to(token_charge))
			.route("/subscriptions/create", web::post().to(subscription_create))
			.route("/subscriptions/update", web::post().to(subscription_update))
			.route("/subscriptions/cancel", web::post().to(subscription_cancel))
			.route("/subscriptions/get", web::post().to(subscription_get))
			.route("/subscriptions/find", web::post().to(subscription_find))
	})
	.workers(1)
	.bind(("127.0.0.1", 0))
	.unwrap();

	let port = server.addrs()[0].port();
	let server = server.run();
	let handle = server.handle();
	actix_web::rt::spawn(server);

	FakeProvider {
		url: format!("http://127.0.0.1:{port}"),
		handle,
	}
}

fn authorized(req: &HttpRequest) -> bool {
	req.headers()
		.get("Authorization")
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.starts_with("Basic "))
}

fn subscription(id: &str, account_id: &str) -> Value {
	json!({
		"Id": id,
		"AccountId": account_id,
		"Description": "Monthly subscription",
		"Email": "user@example.com",
		"Amount": 1.02,
		"Currency": "RUB",
		"RequireConfirmation": false,
		"StartDateIso": "2014-08-09T11:49:41",
		"Interval": "Month",
		"Period": 1,
		"MaxPeriods": 12,
		"Status": "Active"
	})
}

fn subscription_without_contact(id: &str, account_id: &str) -> Value {
	let mut item = subscription(id, account_id);
	item["Email"] = Value::Null;
	item["Description"] = Value::Null;
	item
}

async fn card_charge(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
	if !authorized(&req) {
		return HttpResponse::Unauthorized().finish();
	}

	match body["CardCryptogramPacket"].as_str() {
		Some("needs-3ds") => HttpResponse::Ok().json(json!({
			"Success": false,
			"Message": null,
			"Model": {
				"TransactionId": 504,
				"PaReq": "eJxVUdtugkAQ",
				"AcsUrl": "https://acs.example/3ds"
			}
		})),
		Some("declined") => HttpResponse::Ok().json(json!({
			"Success": false,
			"Message": null,
			"Model": {
				"TransactionId": 505,
				"ReasonCode": 5051,
				"CardHolderMessage": "Insufficient funds"
			}
		})),
		_ => HttpResponse::Ok().json(json!({
			"Success": true,
			"Message": null,
			"Model": {
				"TransactionId": 506,
				"InvoiceId": body["InvoiceId"],
				"Amount": body["Amount"],
				"Status": "Completed"
			}
		})),
	}
}

async fn token_charge(body: web::Json<Value>) -> HttpResponse {
	HttpResponse::Ok().json(json!({
		"Success": true,
		"Message": null,
		"Model": {
			"TransactionId": 507,
			"InvoiceId": body["InvoiceId"],
			"Amount": body["Amount"],
			"Status": "Completed",
			"JsonData": body["JsonData"].to_string(),
			"CardFirstSix": "424242",
			"CardLastFour": "4242",
			"CreatedDateIso": "2024-05-01T10:00:00"
		}
	}))
}

async fn subscription_create(body: web::Json<Value>) -> HttpResponse {
	if body["AccountId"].as_str().is_none_or(str::is_empty) {
		return HttpResponse::Ok().json(json!({
			"Success": false,
			"Message": "AccountId is required"
		}));
	}

	HttpResponse::Ok().json(json!({
		"Success": true,
		"Message": null,
		"Model": subscription("sc_created", body["AccountId"].as_str().unwrap_or_default())
	}))
}

async fn subscription_update(body: web::Json<Value>) -> HttpResponse {
	HttpResponse::Ok().json(json!({
		"Success": body["Id"].as_str().is_some(),
		"Message": null
	}))
}

async fn subscription_cancel(body: web::Json<Value>) -> HttpResponse {
	HttpResponse::Ok().json(json!({
		"Success": body["Id"] == "sc_created",
		"Message": null
	}))
}

async fn subscription_get(body: web::Json<Value>) -> HttpResponse {
	match body["Id"].as_str() {
		Some("boom") => HttpResponse::InternalServerError().finish(),
		Some(id) => HttpResponse::Ok().json(json!({
			"Success": true,
			"Message": null,
			"Model": subscription(id, "user@example.com")
		})),
		None => HttpResponse::BadRequest().finish(),
	}
}

async fn subscription_find(body: web::Json<Value>) -> HttpResponse {
	let account_id = body["accountId"].as_str().unwrap_or("user@example.com");

	HttpResponse::Ok().json(json!({
		"Success": true,
		"Message": null,
		"Model": [
			subscription("sc_first", account_id),
			subscription("sc_second", account_id),
			subscription_without_contact("sc_third", account_id)
		]
	}))
}
