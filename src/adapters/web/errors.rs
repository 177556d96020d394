use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::domain::errors::{DriverError, ProtocolError};

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("Request data is invalid: {_0}")]
	BadClientDataError(#[error(not(source))] String),
	#[display("Payment provider failed: {_0}")]
	ProviderError(#[error(not(source))] String),
	#[display("Schedule not found.")]
	NotFoundError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadClientDataError(_) => "Bad request".to_string(),
			ApiError::ProviderError(_) => "Bad Gateway".to_string(),
			ApiError::NotFoundError => "Not Found".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadClientDataError(_) => StatusCode::BAD_REQUEST,
			ApiError::ProviderError(_) => StatusCode::BAD_GATEWAY,
			ApiError::NotFoundError => StatusCode::NOT_FOUND,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<DriverError> for ApiError {
	fn from(error: DriverError) -> Self {
		match error {
			DriverError::MissingParameter(name) => ApiError::BadClientDataError(
				format!("missing required parameter {name}"),
			),
			DriverError::Protocol(ProtocolError::Http(e))
				if e.status() == Some(reqwest::StatusCode::NOT_FOUND) =>
			{
				ApiError::NotFoundError
			}
			DriverError::Protocol(e) => ApiError::ProviderError(e.to_string()),
		}
	}
}
