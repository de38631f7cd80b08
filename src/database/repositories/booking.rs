use chrono::{Days, NaiveDate, Utc};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{
        AttendanceRow, Booking, BookingScope, BookingStatus, EventBookingFilter, EventStatus,
        EventWageSummary, RolePool, UserBookingRow,
    },
    utils::sql,
};

/// Event statuses and date bounds a [`BookingScope`] selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeWindow {
    pub statuses: Vec<EventStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl BookingScope {
    pub fn window(&self, today: NaiveDate) -> ScopeWindow {
        match self {
            BookingScope::Active => ScopeWindow {
                statuses: vec![EventStatus::Upcoming, EventStatus::Ongoing],
                date_from: None,
                date_to: None,
            },
            BookingScope::Completed => ScopeWindow {
                statuses: vec![EventStatus::Completed],
                date_from: None,
                date_to: None,
            },
            BookingScope::Today => ScopeWindow {
                statuses: vec![
                    EventStatus::Upcoming,
                    EventStatus::Ongoing,
                    EventStatus::Completed,
                ],
                date_from: Some(today),
                date_to: Some(today),
            },
            BookingScope::Upcoming => ScopeWindow {
                statuses: vec![EventStatus::Upcoming],
                date_from: today.checked_add_days(Days::new(1)),
                date_to: None,
            },
        }
    }
}

/// Loads the booking row and holds its lock until the transaction ends.
pub async fn lock_booking(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<Booking>, sqlx::Error> {
    let booking = sqlx::query_as::<_, Booking>(&sql(r#"
            SELECT
                id,
                event_id,
                user_id,
                role,
                status,
                wage_snapshot,
                base_amount,
                extra_amount,
                ta_amount,
                bonus_amount,
                fine_amount,
                total_amount,
                overridden_at,
                overridden_by,
                created_at,
                updated_at
            FROM
                bookings
            WHERE
                id = ?
                AND deleted_at IS NULL
            FOR UPDATE
        "#))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(booking)
}

pub async fn find_active_booking<'e, E>(
    executor: E,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Booking>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let booking = sqlx::query_as::<_, Booking>(&sql(r#"
            SELECT
                id,
                event_id,
                user_id,
                role,
                status,
                wage_snapshot,
                base_amount,
                extra_amount,
                ta_amount,
                bonus_amount,
                fine_amount,
                total_amount,
                overridden_at,
                overridden_by,
                created_at,
                updated_at
            FROM
                bookings
            WHERE
                event_id = ?
                AND user_id = ?
                AND deleted_at IS NULL
        "#))
    .bind(event_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(booking)
}

pub async fn insert_booking(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    user_id: Uuid,
    role: RolePool,
    wage: i64,
) -> Result<Booking, sqlx::Error> {
    let now = Utc::now();
    let booking = sqlx::query_as::<_, Booking>(&sql(r#"
            INSERT INTO
                bookings (
                    id,
                    event_id,
                    user_id,
                    role,
                    status,
                    wage_snapshot,
                    base_amount,
                    total_amount,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                event_id,
                user_id,
                role,
                status,
                wage_snapshot,
                base_amount,
                extra_amount,
                ta_amount,
                bonus_amount,
                fine_amount,
                total_amount,
                overridden_at,
                overridden_by,
                created_at,
                updated_at
        "#))
    .bind(Uuid::new_v4())
    .bind(event_id)
    .bind(user_id)
    .bind(role)
    .bind(BookingStatus::Booked)
    .bind(wage)
    .bind(wage)
    .bind(wage)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

/// Writes status, money fields and override audit of a locked booking.
pub async fn save_booking(
    tx: &mut Transaction<'_, Postgres>,
    booking: &Booking,
) -> Result<Booking, sqlx::Error> {
    let saved = sqlx::query_as::<_, Booking>(&sql(r#"
            UPDATE
                bookings
            SET
                status = ?,
                base_amount = ?,
                extra_amount = ?,
                ta_amount = ?,
                bonus_amount = ?,
                fine_amount = ?,
                total_amount = ?,
                overridden_at = ?,
                overridden_by = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                event_id,
                user_id,
                role,
                status,
                wage_snapshot,
                base_amount,
                extra_amount,
                ta_amount,
                bonus_amount,
                fine_amount,
                total_amount,
                overridden_at,
                overridden_by,
                created_at,
                updated_at
        "#))
    .bind(booking.status)
    .bind(booking.base_amount)
    .bind(booking.extra_amount)
    .bind(booking.ta_amount)
    .bind(booking.bonus_amount)
    .bind(booking.fine_amount)
    .bind(booking.total_amount)
    .bind(booking.overridden_at)
    .bind(booking.overridden_by)
    .bind(Utc::now())
    .bind(booking.id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(saved)
}

pub async fn delete_booking(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(&sql("DELETE FROM bookings WHERE id = ?"))
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}

/// Row-locks every live booking of the event. Event-wide writes call this
/// before locking the event itself so locks are always taken booking first.
pub async fn lock_event_bookings(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let ids = sqlx::query_scalar::<_, Uuid>(&sql(r#"
            SELECT
                id
            FROM
                bookings
            WHERE
                event_id = ?
                AND deleted_at IS NULL
            ORDER BY
                id
            FOR UPDATE
        "#))
    .bind(event_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(ids)
}

pub async fn soft_delete_for_event(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(&sql(r#"
            UPDATE
                bookings
            SET
                deleted_at = ?,
                updated_at = ?
            WHERE
                event_id = ?
                AND deleted_at IS NULL
        "#))
    .bind(now)
    .bind(now)
    .bind(event_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Moves every present booking of the event to completed.
pub async fn complete_present_bookings(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(&sql(r#"
            UPDATE
                bookings
            SET
                status = ?,
                updated_at = ?
            WHERE
                event_id = ?
                AND status = ?
                AND deleted_at IS NULL
        "#))
    .bind(BookingStatus::Completed)
    .bind(Utc::now())
    .bind(event_id)
    .bind(BookingStatus::Present)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// True when `user_id` holds a captain-role booking on the event.
pub async fn is_event_captain<'e, E>(
    executor: E,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let exists = sqlx::query_scalar::<_, bool>(&sql(r#"
            SELECT EXISTS (
                SELECT 1
                FROM bookings
                WHERE event_id = ?
                    AND user_id = ?
                    AND role = ?
                    AND status <> ?
                    AND deleted_at IS NULL
            )
        "#))
    .bind(event_id)
    .bind(user_id)
    .bind(RolePool::Captain)
    .bind(BookingStatus::Absent)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}

/// True when the user holds an active booking on another live event dated `date`.
pub async fn has_booking_on_date(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    date: NaiveDate,
    excluding_event: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists = sqlx::query_scalar::<_, bool>(&sql(r#"
            SELECT EXISTS (
                SELECT 1
                FROM bookings b
                INNER JOIN events e ON e.id = b.event_id
                WHERE b.user_id = ?
                    AND b.deleted_at IS NULL
                    AND e.deleted_at IS NULL
                    AND e.status <> ?
                    AND e.event_date = ?
                    AND e.id <> ?
            )
        "#))
    .bind(user_id)
    .bind(EventStatus::Cancelled)
    .bind(date)
    .bind(excluding_event)
    .fetch_one(&mut **tx)
    .await?;

    Ok(exists)
}

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    scope: BookingScope,
    today: NaiveDate,
) -> Result<Vec<UserBookingRow>, sqlx::Error> {
    let window = scope.window(today);
    let statuses: Vec<String> = window
        .statuses
        .iter()
        .map(|s| s.as_str().to_string())
        .collect();

    let rows = sqlx::query_as::<_, UserBookingRow>(&sql(r#"
            SELECT
                b.id AS booking_id,
                e.id AS event_id,
                e.name AS event_name,
                e.event_date,
                e.time_slot,
                e.reporting_time,
                e.work_type,
                e.location_link,
                e.status AS event_status,
                b.role,
                b.status,
                b.base_amount,
                b.extra_amount,
                b.ta_amount,
                b.bonus_amount,
                b.fine_amount,
                b.total_amount,
                b.created_at
            FROM
                bookings b
                INNER JOIN events e ON e.id = b.event_id
            WHERE
                b.user_id = ?
                AND b.deleted_at IS NULL
                AND e.deleted_at IS NULL
                AND e.status = ANY(?)
                AND (?::DATE IS NULL OR e.event_date >= ?)
                AND (?::DATE IS NULL OR e.event_date <= ?)
            ORDER BY
                e.event_date,
                e.reporting_time
        "#))
    .bind(user_id)
    .bind(statuses)
    .bind(window.date_from)
    .bind(window.date_from)
    .bind(window.date_to)
    .bind(window.date_to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_for_user(
    pool: &PgPool,
    user_id: Uuid,
    booking_id: Uuid,
) -> Result<Option<UserBookingRow>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserBookingRow>(&sql(r#"
            SELECT
                b.id AS booking_id,
                e.id AS event_id,
                e.name AS event_name,
                e.event_date,
                e.time_slot,
                e.reporting_time,
                e.work_type,
                e.location_link,
                e.status AS event_status,
                b.role,
                b.status,
                b.base_amount,
                b.extra_amount,
                b.ta_amount,
                b.bonus_amount,
                b.fine_amount,
                b.total_amount,
                b.created_at
            FROM
                bookings b
                INNER JOIN events e ON e.id = b.event_id
            WHERE
                b.id = ?
                AND b.user_id = ?
                AND b.deleted_at IS NULL
                AND e.deleted_at IS NULL
        "#))
    .bind(booking_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_for_event(
    pool: &PgPool,
    event_id: Uuid,
    filter: &EventBookingFilter,
) -> Result<Vec<AttendanceRow>, sqlx::Error> {
    let name = filter
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let rows = sqlx::query_as::<_, AttendanceRow>(&sql(r#"
            SELECT
                b.id AS booking_id,
                b.user_id,
                u.name AS user_name,
                b.role,
                b.status,
                b.base_amount,
                b.extra_amount,
                b.ta_amount,
                b.bonus_amount,
                b.fine_amount,
                b.total_amount
            FROM
                bookings b
                INNER JOIN users u ON u.id = b.user_id
            WHERE
                b.event_id = ?
                AND b.deleted_at IS NULL
                AND (?::TEXT IS NULL OR b.status = ?)
                AND (?::TEXT IS NULL OR u.name ILIKE '%' || ? || '%')
            ORDER BY
                CASE b.role
                    WHEN 'captain' THEN 0
                    WHEN 'sub_captain' THEN 1
                    WHEN 'main_boy' THEN 2
                    ELSE 3
                END,
                u.name
        "#))
    .bind(event_id)
    .bind(filter.status)
    .bind(filter.status)
    .bind(name)
    .bind(name)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count and money sums over the event's non-absent bookings.
pub async fn wage_summary(pool: &PgPool, event_id: Uuid) -> Result<EventWageSummary, sqlx::Error> {
    let summary = sqlx::query_as::<_, EventWageSummary>(&sql(r#"
            SELECT
                COUNT(*) AS total_workers,
                COALESCE(SUM(base_amount), 0)::BIGINT AS base_total,
                COALESCE(SUM(extra_amount), 0)::BIGINT AS extra_total,
                COALESCE(SUM(ta_amount), 0)::BIGINT AS ta_total,
                COALESCE(SUM(bonus_amount), 0)::BIGINT AS bonus_total,
                COALESCE(SUM(fine_amount), 0)::BIGINT AS fine_total,
                COALESCE(SUM(total_amount), 0)::BIGINT AS grand_total
            FROM
                bookings
            WHERE
                event_id = ?
                AND status <> ?
                AND deleted_at IS NULL
        "#))
    .bind(event_id)
    .bind(BookingStatus::Absent)
    .fetch_one(pool)
    .await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scope_windows() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let active = BookingScope::Active.window(today);
        assert_eq!(
            active.statuses,
            vec![EventStatus::Upcoming, EventStatus::Ongoing]
        );
        assert_eq!(active.date_from, None);

        let today_window = BookingScope::Today.window(today);
        assert_eq!(today_window.date_from, Some(today));
        assert_eq!(today_window.date_to, Some(today));

        let upcoming = BookingScope::Upcoming.window(today);
        assert_eq!(upcoming.date_from, NaiveDate::from_ymd_opt(2025, 3, 11));
        assert_eq!(upcoming.date_to, None);

        assert_eq!(
            BookingScope::Completed.window(today).statuses,
            vec![EventStatus::Completed]
        );
    }
}
