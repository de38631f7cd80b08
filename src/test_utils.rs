use actix_web::{App, web};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::AppState;
use crate::config::Config;
use crate::database::models::UserRole;
use crate::routes;
use crate::services::auth::Claims;

/// Test application factory for handler tests that never reach the database.
///
/// The pool is lazy, so any request that gets past authorization and input
/// validation fails on connect instead of touching real data.
pub struct TestApp {
    pub config: Config,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            config: Config::test_config(),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
            .expect("lazy pool");

        App::new()
            .app_data(web::Data::new(AppState::new(pool, &self.config)))
            .app_data(web::Data::new(self.config.clone()))
            .configure(routes::configure)
    }
}

/// Authentication helper for tests
pub struct AuthHelper;

impl AuthHelper {
    pub fn token(role: UserRole, permissions: &[&str], config: &Config) -> String {
        Claims::new(
            Uuid::new_v4(),
            role,
            permissions.iter().map(|p| p.to_string()).collect(),
            Duration::hours(1),
        )
        .sign(&config.jwt_secret)
        .expect("Failed to sign test token")
    }

    pub fn auth_header(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }
}
