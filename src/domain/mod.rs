pub mod errors;
pub mod notification;
pub mod pay_service;
pub mod payment;
pub mod protocol;
pub mod schedule;
