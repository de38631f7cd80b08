use actix_web::web;

use crate::error::AppError;

pub mod bookings;
pub mod events;
pub mod wages;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::validation(format!("Invalid request body: {}", err)).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::validation(format!("Invalid query string: {}", err)).into()
            }))
            .configure(events::configure)
            .configure(bookings::configure)
            .configure(wages::configure),
    );
}
