pub mod http_cloudpayments_protocol;
