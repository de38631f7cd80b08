use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{
        Actor, CompletionReport, CreateEventInput, Event, EventQuery, LifecycleAction,
        UpdateEventInput,
    },
    repositories::{booking as booking_repo, event as event_repo, user as user_repo},
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::{
    access::ensure_event_operator,
    lifecycle::{apply_update, normalize_create},
};

fn event_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Event {} not found", id))
}

#[derive(Clone)]
pub struct EventService {
    pool: PgPool,
    same_day_exclusive: bool,
}

impl EventService {
    pub fn new(pool: PgPool, same_day_exclusive: bool) -> Self {
        Self {
            pool,
            same_day_exclusive,
        }
    }

    pub async fn create(&self, input: CreateEventInput) -> Result<Event, AppError> {
        let input = normalize_create(input, Utc::now().date_naive())?;

        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = event_repo::insert_event(&mut tx, &input)
            .await
            .map_err(AppError::from);
        let event = DatabaseTransaction::finish(tx, result).await?;

        log::info!("Created event {} ({}) on {}", event.id, event.name, event.event_date);
        Ok(event)
    }

    pub async fn update(&self, id: Uuid, input: UpdateEventInput) -> Result<Event, AppError> {
        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            let mut event = event_repo::lock_event(&mut tx, id)
                .await?
                .ok_or_else(|| event_not_found(id))?;
            apply_update(&mut event, input, Utc::now().date_naive())?;
            Ok::<_, AppError>(event_repo::save_event(&mut tx, &event).await?)
        }
        .await;
        let event = DatabaseTransaction::finish(tx, result).await?;

        log::info!("Updated event {}", event.id);
        Ok(event)
    }

    pub async fn start(&self, actor: Actor, id: Uuid) -> Result<Event, AppError> {
        self.transition(actor, id, LifecycleAction::Start).await
    }

    pub async fn cancel(&self, actor: Actor, id: Uuid) -> Result<Event, AppError> {
        self.transition(actor, id, LifecycleAction::Cancel).await
    }

    async fn transition(
        &self,
        actor: Actor,
        id: Uuid,
        action: LifecycleAction,
    ) -> Result<Event, AppError> {
        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            let mut event = event_repo::lock_event(&mut tx, id)
                .await?
                .ok_or_else(|| event_not_found(id))?;
            ensure_event_operator(&mut *tx, actor, id).await?;
            event.status = event.status.apply(action)?;
            Ok::<_, AppError>(event_repo::save_event(&mut tx, &event).await?)
        }
        .await;
        let event = DatabaseTransaction::finish(tx, result).await?;

        log::info!(
            "Event {} moved to {} by {} ({})",
            event.id,
            event.status,
            actor.user_id(),
            action
        );
        Ok(event)
    }

    /// Completes an ongoing event, crediting every attending worker once and
    /// closing out present bookings, all in one transaction.
    pub async fn complete(&self, actor: Actor, id: Uuid) -> Result<CompletionReport, AppError> {
        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            booking_repo::lock_event_bookings(&mut tx, id).await?;
            let mut event = event_repo::lock_event(&mut tx, id)
                .await?
                .ok_or_else(|| event_not_found(id))?;
            ensure_event_operator(&mut *tx, actor, id).await?;
            event.status = event.status.apply(LifecycleAction::Complete)?;

            let workers_credited = user_repo::credit_completed_work(&mut tx, id).await?;
            let bookings_completed = booking_repo::complete_present_bookings(&mut tx, id).await?;
            let event = event_repo::save_event(&mut tx, &event).await?;

            Ok::<_, AppError>(CompletionReport {
                event,
                bookings_completed,
                workers_credited,
            })
        }
        .await;
        let report = DatabaseTransaction::finish(tx, result).await?;

        log::info!(
            "Completed event {}: {} bookings closed, {} workers credited",
            report.event.id,
            report.bookings_completed,
            report.workers_credited
        );
        Ok(report)
    }

    /// Soft-deletes an upcoming event together with its bookings.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            booking_repo::lock_event_bookings(&mut tx, id).await?;
            let event = event_repo::lock_event(&mut tx, id)
                .await?
                .ok_or_else(|| event_not_found(id))?;
            event.status.apply(LifecycleAction::Delete)?;
            let bookings = booking_repo::soft_delete_for_event(&mut tx, id).await?;
            event_repo::soft_delete_event(&mut tx, id).await?;
            Ok::<_, AppError>(bookings)
        }
        .await;
        let bookings = DatabaseTransaction::finish(tx, result).await?;

        log::info!("Deleted event {} and {} bookings", id, bookings);
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Event, AppError> {
        event_repo::find_event(&self.pool, id)
            .await?
            .ok_or_else(|| event_not_found(id))
    }

    pub async fn list(&self, query: &EventQuery) -> Result<Vec<Event>, AppError> {
        Ok(event_repo::list_events(&self.pool, query).await?)
    }

    /// Upcoming events the worker could still book into their role's pool.
    pub async fn list_available(&self, user_id: Uuid) -> Result<Vec<Event>, AppError> {
        let user = user_repo::find_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        let role = user.role.pool().ok_or(AppError::InvalidRole)?;

        Ok(event_repo::list_available_for_role(
            &self.pool,
            user_id,
            role,
            Utc::now().date_naive(),
            self.same_day_exclusive,
        )
        .await?)
    }
}
