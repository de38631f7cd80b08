use chrono::{NaiveDate, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{CreateEventInput, Event, EventQuery, EventStatus, RolePool},
    utils::sql,
};

pub(crate) fn remaining_column(role: RolePool) -> &'static str {
    match role {
        RolePool::Captain => "remaining_captains",
        RolePool::SubCaptain => "remaining_sub_captains",
        RolePool::MainBoy => "remaining_main_boys",
        RolePool::JuniorBoy => "remaining_juniors",
    }
}

/// Inserts an already normalized event with every pool fully open.
pub async fn insert_event(
    tx: &mut Transaction<'_, Postgres>,
    input: &CreateEventInput,
) -> Result<Event, sqlx::Error> {
    let now = Utc::now();
    let event = sqlx::query_as::<_, Event>(&sql(r#"
            INSERT INTO
                events (
                    id,
                    name,
                    event_date,
                    time_slot,
                    reporting_time,
                    work_type,
                    location_link,
                    required_captains,
                    required_sub_captains,
                    required_main_boys,
                    required_juniors,
                    remaining_captains,
                    remaining_sub_captains,
                    remaining_main_boys,
                    remaining_juniors,
                    long_work,
                    extra_wage_amount,
                    transport_provided,
                    transport_type,
                    status,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                event_date,
                time_slot,
                reporting_time,
                work_type,
                location_link,
                required_captains,
                required_sub_captains,
                required_main_boys,
                required_juniors,
                remaining_captains,
                remaining_sub_captains,
                remaining_main_boys,
                remaining_juniors,
                long_work,
                extra_wage_amount,
                transport_provided,
                transport_type,
                status,
                created_at,
                updated_at
        "#))
    .bind(Uuid::new_v4())
    .bind(&input.name)
    .bind(input.event_date)
    .bind(input.time_slot)
    .bind(input.reporting_time)
    .bind(&input.work_type)
    .bind(&input.location_link)
    .bind(input.required_captains)
    .bind(input.required_sub_captains)
    .bind(input.required_main_boys)
    .bind(input.required_juniors)
    .bind(input.required_captains)
    .bind(input.required_sub_captains)
    .bind(input.required_main_boys)
    .bind(input.required_juniors)
    .bind(input.long_work)
    .bind(input.extra_wage_amount)
    .bind(input.transport_provided)
    .bind(input.transport_type)
    .bind(EventStatus::Upcoming)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(event)
}

pub async fn find_event<'e, E>(executor: E, id: Uuid) -> Result<Option<Event>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let event = sqlx::query_as::<_, Event>(&sql(r#"
            SELECT
                id,
                name,
                event_date,
                time_slot,
                reporting_time,
                work_type,
                location_link,
                required_captains,
                required_sub_captains,
                required_main_boys,
                required_juniors,
                remaining_captains,
                remaining_sub_captains,
                remaining_main_boys,
                remaining_juniors,
                long_work,
                extra_wage_amount,
                transport_provided,
                transport_type,
                status,
                created_at,
                updated_at
            FROM
                events
            WHERE
                id = ?
                AND deleted_at IS NULL
        "#))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(event)
}

/// Loads the event row and holds its lock until the transaction ends.
pub async fn lock_event(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<Event>, sqlx::Error> {
    let event = sqlx::query_as::<_, Event>(&sql(r#"
            SELECT
                id,
                name,
                event_date,
                time_slot,
                reporting_time,
                work_type,
                location_link,
                required_captains,
                required_sub_captains,
                required_main_boys,
                required_juniors,
                remaining_captains,
                remaining_sub_captains,
                remaining_main_boys,
                remaining_juniors,
                long_work,
                extra_wage_amount,
                transport_provided,
                transport_type,
                status,
                created_at,
                updated_at
            FROM
                events
            WHERE
                id = ?
                AND deleted_at IS NULL
            FOR UPDATE
        "#))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(event)
}

/// Writes back every mutable column of a locked event.
pub async fn save_event(
    tx: &mut Transaction<'_, Postgres>,
    event: &Event,
) -> Result<Event, sqlx::Error> {
    let saved = sqlx::query_as::<_, Event>(&sql(r#"
            UPDATE
                events
            SET
                name = ?,
                event_date = ?,
                time_slot = ?,
                reporting_time = ?,
                work_type = ?,
                location_link = ?,
                required_captains = ?,
                required_sub_captains = ?,
                required_main_boys = ?,
                required_juniors = ?,
                remaining_captains = ?,
                remaining_sub_captains = ?,
                remaining_main_boys = ?,
                remaining_juniors = ?,
                long_work = ?,
                extra_wage_amount = ?,
                transport_provided = ?,
                transport_type = ?,
                status = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                event_date,
                time_slot,
                reporting_time,
                work_type,
                location_link,
                required_captains,
                required_sub_captains,
                required_main_boys,
                required_juniors,
                remaining_captains,
                remaining_sub_captains,
                remaining_main_boys,
                remaining_juniors,
                long_work,
                extra_wage_amount,
                transport_provided,
                transport_type,
                status,
                created_at,
                updated_at
        "#))
    .bind(&event.name)
    .bind(event.event_date)
    .bind(event.time_slot)
    .bind(event.reporting_time)
    .bind(&event.work_type)
    .bind(&event.location_link)
    .bind(event.required_captains)
    .bind(event.required_sub_captains)
    .bind(event.required_main_boys)
    .bind(event.required_juniors)
    .bind(event.remaining_captains)
    .bind(event.remaining_sub_captains)
    .bind(event.remaining_main_boys)
    .bind(event.remaining_juniors)
    .bind(event.long_work)
    .bind(event.extra_wage_amount)
    .bind(event.transport_provided)
    .bind(event.transport_type)
    .bind(event.status)
    .bind(Utc::now())
    .bind(event.id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(saved)
}

pub async fn soft_delete_event(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<u64, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(&sql(r#"
            UPDATE
                events
            SET
                deleted_at = ?,
                updated_at = ?
            WHERE
                id = ?
                AND deleted_at IS NULL
        "#))
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

pub async fn list_events(pool: &PgPool, query: &EventQuery) -> Result<Vec<Event>, sqlx::Error> {
    let events = sqlx::query_as::<_, Event>(&sql(r#"
            SELECT
                id,
                name,
                event_date,
                time_slot,
                reporting_time,
                work_type,
                location_link,
                required_captains,
                required_sub_captains,
                required_main_boys,
                required_juniors,
                remaining_captains,
                remaining_sub_captains,
                remaining_main_boys,
                remaining_juniors,
                long_work,
                extra_wage_amount,
                transport_provided,
                transport_type,
                status,
                created_at,
                updated_at
            FROM
                events
            WHERE
                deleted_at IS NULL
                AND (?::TEXT IS NULL OR status = ?)
                AND (?::DATE IS NULL OR event_date = ?)
            ORDER BY
                event_date,
                reporting_time
        "#))
    .bind(query.status)
    .bind(query.status)
    .bind(query.date)
    .bind(query.date)
    .fetch_all(pool)
    .await?;

    Ok(events)
}

/// Upcoming events from `today` on that still have room in `role`'s pool and that
/// `user_id` has not booked. With `exclude_booked_dates`, dates on which the user
/// already holds an active booking are skipped too.
pub async fn list_available_for_role(
    pool: &PgPool,
    user_id: Uuid,
    role: RolePool,
    today: NaiveDate,
    exclude_booked_dates: bool,
) -> Result<Vec<Event>, sqlx::Error> {
    let query = format!(
        r#"
            SELECT
                e.id,
                e.name,
                e.event_date,
                e.time_slot,
                e.reporting_time,
                e.work_type,
                e.location_link,
                e.required_captains,
                e.required_sub_captains,
                e.required_main_boys,
                e.required_juniors,
                e.remaining_captains,
                e.remaining_sub_captains,
                e.remaining_main_boys,
                e.remaining_juniors,
                e.long_work,
                e.extra_wage_amount,
                e.transport_provided,
                e.transport_type,
                e.status,
                e.created_at,
                e.updated_at
            FROM
                events e
            WHERE
                e.deleted_at IS NULL
                AND e.status = ?
                AND e.event_date >= ?
                AND e.{remaining} > 0
                AND NOT EXISTS (
                    SELECT 1 FROM bookings b
                    WHERE b.event_id = e.id AND b.user_id = ? AND b.deleted_at IS NULL
                )
                AND (
                    NOT ?
                    OR NOT EXISTS (
                        SELECT 1
                        FROM bookings b2
                        INNER JOIN events e2 ON e2.id = b2.event_id
                        WHERE b2.user_id = ?
                            AND b2.deleted_at IS NULL
                            AND e2.deleted_at IS NULL
                            AND e2.status <> ?
                            AND e2.event_date = e.event_date
                    )
                )
            ORDER BY
                e.event_date,
                e.reporting_time
        "#,
        remaining = remaining_column(role)
    );

    let events = sqlx::query_as::<_, Event>(&sql(&query))
        .bind(EventStatus::Upcoming)
        .bind(today)
        .bind(user_id)
        .bind(exclude_booked_dates)
        .bind(user_id)
        .bind(EventStatus::Cancelled)
        .fetch_all(pool)
        .await?;

    Ok(events)
}
