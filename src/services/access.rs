use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::{models::Actor, repositories::booking as booking_repo};
use crate::error::AppError;

/// Admins may operate any event; a worker only an event they are captain of.
///
/// Admin permission slugs are checked at the HTTP boundary before this runs.
pub async fn ensure_event_operator<'e, E>(
    executor: E,
    actor: Actor,
    event_id: Uuid,
) -> Result<(), AppError>
where
    E: PgExecutor<'e>,
{
    match actor {
        Actor::Admin(_) => Ok(()),
        Actor::Worker { user_id, .. } if actor.is_captain() => {
            if booking_repo::is_event_captain(executor, event_id, user_id).await? {
                Ok(())
            } else {
                log::debug!(
                    "User {} is not a captain on event {}; rejecting",
                    user_id,
                    event_id
                );
                Err(AppError::Forbidden(
                    "only the event's captain may do this".to_string(),
                ))
            }
        }
        Actor::Worker { .. } => Err(AppError::Forbidden(
            "only admins or the event's captain may do this".to_string(),
        )),
    }
}
