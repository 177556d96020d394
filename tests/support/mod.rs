#![allow(dead_code)]

pub mod fake_protocol;
pub mod fake_provider;
