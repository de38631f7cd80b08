use actix_web::web;

use crate::handlers::bookings;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("/my", web::get().to(bookings::my_bookings))
            .route("/my/{id}", web::get().to(bookings::my_booking))
            .route("/{id}/attendance", web::put().to(bookings::update_attendance))
            .route("/{id}/wage", web::put().to(bookings::override_wage)),
    );
}
