use chrono::Utc;
use sqlx::{PgExecutor, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{BookingStatus, CreateUserInput, User, UserRole, UserStatus},
    utils::sql,
};

pub async fn create_user<'e, E>(executor: E, input: &CreateUserInput) -> Result<User, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let now = Utc::now();
    let user = sqlx::query_as::<_, User>(&sql(r#"
            INSERT INTO
                users (
                    id,
                    name,
                    phone,
                    role,
                    status,
                    current_wage,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                phone,
                role,
                status,
                current_wage,
                completed_work,
                created_at,
                updated_at
        "#))
    .bind(Uuid::new_v4())
    .bind(&input.name)
    .bind(&input.phone)
    .bind(input.role)
    .bind(UserStatus::Active)
    .bind(input.current_wage)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(user)
}

pub async fn find_user<'e, E>(executor: E, id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(&sql(r#"
            SELECT
                id,
                name,
                phone,
                role,
                status,
                current_wage,
                completed_work,
                created_at,
                updated_at
            FROM
                users
            WHERE
                id = ?
                AND deleted_at IS NULL
        "#))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

/// Loads the user row and holds its lock until the transaction ends.
pub async fn lock_user(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&sql(r#"
            SELECT
                id,
                name,
                phone,
                role,
                status,
                current_wage,
                completed_work,
                created_at,
                updated_at
            FROM
                users
            WHERE
                id = ?
                AND deleted_at IS NULL
            FOR UPDATE
        "#))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(user)
}

/// Adds one completed job to every distinct worker with a present or completed
/// booking on the event. Returns the number of workers credited.
pub async fn credit_completed_work(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(&sql(r#"
            UPDATE
                users
            SET
                completed_work = completed_work + 1,
                updated_at = ?
            WHERE
                id IN (
                    SELECT DISTINCT user_id
                    FROM bookings
                    WHERE event_id = ?
                        AND status IN (?, ?)
                        AND deleted_at IS NULL
                )
        "#))
    .bind(Utc::now())
    .bind(event_id)
    .bind(BookingStatus::Present)
    .bind(BookingStatus::Completed)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update_wage_for_role(
    tx: &mut Transaction<'_, Postgres>,
    role: UserRole,
    wage: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(&sql(r#"
            UPDATE
                users
            SET
                current_wage = ?,
                updated_at = ?
            WHERE
                role = ?
                AND deleted_at IS NULL
        "#))
    .bind(wage)
    .bind(Utc::now())
    .bind(role)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}
