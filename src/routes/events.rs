use actix_web::web;

use crate::handlers::events;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::post().to(events::create_event))
            .route("", web::get().to(events::list_events))
            // must precede "/{id}"
            .route("/available", web::get().to(events::list_available_events))
            .route("/{id}", web::get().to(events::get_event))
            .route("/{id}", web::put().to(events::update_event))
            .route("/{id}", web::delete().to(events::delete_event))
            .route("/{id}/start", web::post().to(events::start_event))
            .route("/{id}/complete", web::post().to(events::complete_event))
            .route("/{id}/cancel", web::post().to(events::cancel_event))
            .route("/{id}/book", web::post().to(events::book_event))
            .route("/{id}/bookings", web::get().to(events::list_event_bookings))
            .route(
                "/{id}/bookings/{booking_id}",
                web::delete().to(events::remove_booking),
            )
            .route("/{id}/wage-summary", web::get().to(events::event_wage_summary)),
    );
}
