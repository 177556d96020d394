use derive_more::derive::{Display, Error, From};

/// Failures raised by a [`CloudPaymentsProtocol`](crate::domain::protocol::CloudPaymentsProtocol).
#[derive(Debug, Display, Error, From)]
pub enum ProtocolError {
	#[display("HTTP request to the provider failed: {_0}")]
	Http(reqwest::Error),
	#[display("Provider rejected the request: {_0}")]
	#[from(skip)]
	Rejected(#[error(not(source))] String),
	#[display("Payment declined: {_0}")]
	#[from(skip)]
	Declined(#[error(not(source))] String),
	#[display("Unexpected provider response: {_0}")]
	#[from(skip)]
	MalformedResponse(#[error(not(source))] String),
}

#[derive(Debug, Display, Error, From)]
pub enum DriverError {
	#[display("Missing required parameter: {_0}")]
	#[from(skip)]
	MissingParameter(#[error(not(source))] String),
	#[display("{_0}")]
	Protocol(ProtocolError),
}
