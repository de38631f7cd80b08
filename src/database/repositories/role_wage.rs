use chrono::Utc;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::database::{
    models::{RolePool, RoleWage},
    utils::sql,
};

pub async fn list_role_wages(pool: &PgPool) -> Result<Vec<RoleWage>, sqlx::Error> {
    let wages = sqlx::query_as::<_, RoleWage>(&sql(r#"
            SELECT
                id,
                role,
                wage,
                created_at,
                updated_at
            FROM
                role_wages
            ORDER BY
                wage DESC
        "#))
    .fetch_all(pool)
    .await?;

    Ok(wages)
}

pub async fn find_role_wage<'e, E>(
    executor: E,
    role: RolePool,
) -> Result<Option<RoleWage>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let wage = sqlx::query_as::<_, RoleWage>(&sql(r#"
            SELECT
                id,
                role,
                wage,
                created_at,
                updated_at
            FROM
                role_wages
            WHERE
                role = ?
        "#))
    .bind(role)
    .fetch_optional(executor)
    .await?;

    Ok(wage)
}

pub async fn lock_role_wage(
    tx: &mut Transaction<'_, Postgres>,
    role: RolePool,
) -> Result<Option<RoleWage>, sqlx::Error> {
    let wage = sqlx::query_as::<_, RoleWage>(&sql(r#"
            SELECT
                id,
                role,
                wage,
                created_at,
                updated_at
            FROM
                role_wages
            WHERE
                role = ?
            FOR UPDATE
        "#))
    .bind(role)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(wage)
}

pub async fn update_role_wage(
    tx: &mut Transaction<'_, Postgres>,
    role: RolePool,
    wage: i64,
) -> Result<RoleWage, sqlx::Error> {
    let updated = sqlx::query_as::<_, RoleWage>(&sql(r#"
            UPDATE
                role_wages
            SET
                wage = ?,
                updated_at = ?
            WHERE
                role = ?
            RETURNING
                id,
                role,
                wage,
                created_at,
                updated_at
        "#))
    .bind(wage)
    .bind(Utc::now())
    .bind(role)
    .fetch_one(&mut **tx)
    .await?;

    Ok(updated)
}
