use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload, web::Data};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::UserRole;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub role: UserRole,
    #[serde(default)]
    pub permissions: Vec<String>, // admin permission slugs
    pub exp: usize, // expiration time
}

impl Claims {
    pub fn new(user_id: Uuid, role: UserRole, permissions: Vec<String>, ttl: Duration) -> Self {
        Self {
            sub: user_id,
            role,
            permissions,
            exp: (Utc::now() + ttl).timestamp().max(0) as usize,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Signs the claims with HS256.
    pub fn sign(&self, secret: &str) -> Result<String, AppError> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .map_err(|e| AppError::internal_server_error_message(e.to_string()))
    }

    pub fn verify(token: &str, secret: &str) -> Result<Self, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            log::debug!("Rejected bearer token: {}", e);
            AppError::Unauthorized
        })
    }
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let Some(token) = token else {
            return ready(Err(AppError::Unauthorized.into()));
        };

        let Some(config) = req.app_data::<Data<Config>>() else {
            log::error!("Config missing from app data; cannot verify bearer token");
            return ready(Err(AppError::internal_server_error().into()));
        };

        ready(Claims::verify(token, &config.jwt_secret).map_err(Into::into))
    }
}
