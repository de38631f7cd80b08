use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum UserRole {
        Admin => "admin",
        Captain => "captain",
        SubCaptain => "sub_captain",
        MainBoy => "main_boy",
        JuniorBoy => "junior_boy",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum UserStatus {
        Active => "active",
        Blocked => "blocked",
    }
}

string_enum! {
    /// One of the four bookable capacity pools on an event.
    ///
    /// The string values match the worker roles, so a booking's role column reads
    /// the same as the role of the user who made it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum RolePool {
        Captain => "captain",
        SubCaptain => "sub_captain",
        MainBoy => "main_boy",
        JuniorBoy => "junior_boy",
    }
}

impl UserRole {
    /// The capacity pool a user of this role books into. Admin accounts have none.
    pub fn pool(&self) -> Option<RolePool> {
        match self {
            UserRole::Admin => None,
            UserRole::Captain => Some(RolePool::Captain),
            UserRole::SubCaptain => Some(RolePool::SubCaptain),
            UserRole::MainBoy => Some(RolePool::MainBoy),
            UserRole::JuniorBoy => Some(RolePool::JuniorBoy),
        }
    }
}

impl From<RolePool> for UserRole {
    fn from(pool: RolePool) -> Self {
        match pool {
            RolePool::Captain => UserRole::Captain,
            RolePool::SubCaptain => UserRole::SubCaptain,
            RolePool::MainBoy => UserRole::MainBoy,
            RolePool::JuniorBoy => UserRole::JuniorBoy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub current_wage: i64,
    pub completed_work: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub current_wage: i64,
}

/// Who is driving an operation, as far as the booking core cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Admin(Uuid),
    Worker { user_id: Uuid, role: UserRole },
}

impl Actor {
    pub fn user_id(&self) -> Uuid {
        match self {
            Actor::Admin(id) => *id,
            Actor::Worker { user_id, .. } => *user_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin(_))
    }

    pub fn is_captain(&self) -> bool {
        matches!(
            self,
            Actor::Worker {
                role: UserRole::Captain,
                ..
            }
        )
    }
}
