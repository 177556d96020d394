pub mod errors;
pub mod notifications_handler;
pub mod payments_handler;
pub mod schedules_handler;
pub mod schema;
