use actix_web::{HttpResponse, Responder, ResponseError, delete, get, post, web};
use log::warn;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{
	ScheduleFilter, ScheduleRemovedResponse, ScheduleSavedResponse,
};
use crate::domain::schedule::{RecurringPaymentSchedule, Schedule};
use crate::drivers::DriverFactory;

#[post("/schedules")]
pub async fn save_schedule(
	payload: web::Json<Schedule>,
	drivers: web::Data<DriverFactory>,
) -> impl Responder {
	let mut schedule = payload.into_inner();

	match drivers.driver().save_schedule(&mut schedule).await {
		Ok(id) => HttpResponse::Ok().json(ScheduleSavedResponse { id }),
		Err(e) => {
			warn!("Error saving schedule: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[get("/schedules")]
pub async fn list_schedules(
	filter: web::Query<ScheduleFilter>,
	drivers: web::Data<DriverFactory>,
) -> impl Responder {
	match drivers
		.driver()
		.get_all_schedules(filter.account_id.as_deref())
		.await
	{
		Ok(schedules) => HttpResponse::Ok().json(schedules),
		Err(e) => {
			warn!("Error listing schedules: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[get("/schedules/{id}")]
pub async fn get_schedule(
	path: web::Path<String>,
	drivers: web::Data<DriverFactory>,
) -> impl Responder {
	match drivers.driver().get_schedule(&path).await {
		Ok(schedule) => HttpResponse::Ok().json(schedule),
		Err(e) => {
			warn!("Error fetching schedule {path}: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[delete("/schedules/{id}")]
pub async fn remove_schedule(
	path: web::Path<String>,
	drivers: web::Data<DriverFactory>,
) -> impl Responder {
	match drivers.driver().remove_schedule(&path).await {
		Ok(removed) => HttpResponse::Ok().json(ScheduleRemovedResponse { removed }),
		Err(e) => {
			warn!("Error removing schedule {path}: {e}");
			ApiError::from(e).error_response()
		}
	}
}
