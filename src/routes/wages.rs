use actix_web::web;

use crate::handlers::wages;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/role-wages")
            .route("", web::get().to(wages::list_role_wages))
            .route("/{role}", web::put().to(wages::update_role_wage)),
    );
}
