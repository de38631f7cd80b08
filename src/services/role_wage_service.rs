use sqlx::PgPool;

use crate::database::{
    models::{RolePool, RoleWage, RoleWageUpdate, UserRole},
    repositories::{role_wage as role_wage_repo, user as user_repo},
    transaction::DatabaseTransaction,
};
use crate::error::AppError;

#[derive(Clone)]
pub struct RoleWageService {
    pool: PgPool,
}

impl RoleWageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<RoleWage>, AppError> {
        Ok(role_wage_repo::list_role_wages(&self.pool).await?)
    }

    /// Sets a role's standard wage and reprices every user of that role.
    /// Bookings already made keep their snapshot.
    pub async fn update(&self, role: RolePool, wage: i64) -> Result<RoleWageUpdate, AppError> {
        if wage <= 0 {
            return Err(AppError::validation("Wage must be greater than zero"));
        }

        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            let current = role_wage_repo::lock_role_wage(&mut tx, role)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No wage entry for {}", role)))?;
            if current.wage == wage {
                return Err(AppError::NoChanges);
            }

            let role_wage = role_wage_repo::update_role_wage(&mut tx, role, wage).await?;
            let users_updated =
                user_repo::update_wage_for_role(&mut tx, UserRole::from(role), wage).await?;
            Ok::<_, AppError>(RoleWageUpdate {
                role_wage,
                users_updated,
            })
        }
        .await;
        let update = DatabaseTransaction::finish(tx, result).await?;

        log::info!(
            "Standard wage for {} set to {}; {} users repriced",
            role,
            wage,
            update.users_updated
        );
        Ok(update)
    }
}
