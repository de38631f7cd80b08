use pretty_assertions::assert_eq;
use serial_test::serial;

use eventcrew::database::models::*;
use eventcrew::database::repositories::{role_wage as role_wage_repo, user as user_repo};
use eventcrew::error::AppError;

mod common;
use common::{MockData, TestContext, captain_actor, create_test_user};

fn attendance(status: BookingStatus, ta: i64, bonus: i64, fine: i64) -> AttendanceInput {
    AttendanceInput {
        status,
        adjustment: WageAdjustment {
            ta_amount: ta,
            bonus_amount: bonus,
            fine_amount: fine,
        },
    }
}

#[tokio::test]
#[serial]
async fn test_role_wage_change_does_not_touch_existing_bookings() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let ctx = TestContext::new(pool).await;
    let original = role_wage_repo::find_role_wage(&ctx.pool, RolePool::Captain)
        .await
        .unwrap()
        .unwrap()
        .wage;

    let event = ctx.upcoming_event(MockData::event(1, 0)).await;
    let captain = create_test_user(&ctx.pool, UserRole::Captain, 1200).await;
    let booking = ctx.bookings.book(captain.id, event.id).await.unwrap();
    assert_eq!(booking.base_amount, 1200);

    let update = ctx
        .role_wages
        .update(RolePool::Captain, original + 300)
        .await
        .unwrap();
    assert!(update.users_updated >= 1);

    let repriced = user_repo::find_user(&ctx.pool, captain.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(repriced.current_wage, original + 300);

    let detail = ctx
        .bookings
        .get_for_user(captain.id, booking.id)
        .await
        .unwrap();
    assert_eq!(detail.base_amount, 1200);

    let unchanged = ctx.role_wages.update(RolePool::Captain, original + 300).await;
    assert!(matches!(unchanged, Err(AppError::NoChanges)));

    ctx.role_wages
        .update(RolePool::Captain, original)
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
async fn test_long_work_attendance_then_absent() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let ctx = TestContext::new(pool).await;
    let event = ctx.upcoming_event(MockData::long_work_event(1, 200)).await;
    let captain = create_test_user(&ctx.pool, UserRole::Captain, 1200).await;
    let booking = ctx.bookings.book(captain.id, event.id).await.unwrap();
    ctx.events.start(ctx.admin(), event.id).await.unwrap();

    let present = ctx
        .attendance
        .update_attendance(
            ctx.admin(),
            booking.id,
            attendance(BookingStatus::Present, 50, 0, 30),
        )
        .await
        .unwrap();
    assert_eq!(present.extra_amount, 200);
    assert_eq!(present.total_amount, 1420);

    let absent = ctx
        .attendance
        .update_attendance(
            ctx.admin(),
            booking.id,
            attendance(BookingStatus::Absent, 0, 0, 0),
        )
        .await
        .unwrap();
    assert_eq!(
        (
            absent.base_amount,
            absent.extra_amount,
            absent.ta_amount,
            absent.bonus_amount,
            absent.fine_amount,
            absent.total_amount
        ),
        (0, 0, 0, 0, 0, 0)
    );
    assert_eq!(absent.wage_snapshot, 1200);
}

#[tokio::test]
#[serial]
async fn test_repeated_attendance_leaves_row_untouched() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let ctx = TestContext::new(pool).await;
    let event = ctx.upcoming_event(MockData::event(0, 1)).await;
    let junior = create_test_user(&ctx.pool, UserRole::JuniorBoy, 500).await;
    let booking = ctx.bookings.book(junior.id, event.id).await.unwrap();
    ctx.events.start(ctx.admin(), event.id).await.unwrap();

    let input = attendance(BookingStatus::Present, 20, 10, 5);
    let first = ctx
        .attendance
        .update_attendance(ctx.admin(), booking.id, input.clone())
        .await
        .unwrap();
    let second = ctx
        .attendance
        .update_attendance(ctx.admin(), booking.id, input)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(second.total_amount, 525);
}

#[tokio::test]
#[serial]
async fn test_attendance_requires_ongoing_event() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let ctx = TestContext::new(pool).await;
    let event = ctx.upcoming_event(MockData::event(0, 1)).await;
    let junior = create_test_user(&ctx.pool, UserRole::JuniorBoy, 500).await;
    let booking = ctx.bookings.book(junior.id, event.id).await.unwrap();

    let result = ctx
        .attendance
        .update_attendance(
            ctx.admin(),
            booking.id,
            attendance(BookingStatus::Present, 0, 0, 0),
        )
        .await;
    assert!(matches!(result, Err(AppError::EventNotOngoing)));
}

#[tokio::test]
#[serial]
async fn test_only_the_event_captain_may_mark_attendance() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let ctx = TestContext::new(pool).await;
    let event = ctx.upcoming_event(MockData::event(1, 1)).await;
    let captain = create_test_user(&ctx.pool, UserRole::Captain, 1200).await;
    let outsider = create_test_user(&ctx.pool, UserRole::Captain, 1200).await;
    let junior = create_test_user(&ctx.pool, UserRole::JuniorBoy, 500).await;

    ctx.bookings.book(captain.id, event.id).await.unwrap();
    let junior_booking = ctx.bookings.book(junior.id, event.id).await.unwrap();
    ctx.events
        .start(captain_actor(&captain), event.id)
        .await
        .unwrap();

    let marked = ctx
        .attendance
        .update_attendance(
            captain_actor(&captain),
            junior_booking.id,
            attendance(BookingStatus::Present, 0, 0, 0),
        )
        .await
        .unwrap();
    assert_eq!(marked.status, BookingStatus::Present);

    let denied = ctx
        .attendance
        .update_attendance(
            captain_actor(&outsider),
            junior_booking.id,
            attendance(BookingStatus::Absent, 0, 0, 0),
        )
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let summary = ctx
        .attendance
        .event_wage_summary(captain_actor(&outsider), event.id)
        .await;
    assert!(matches!(summary, Err(AppError::Forbidden(_))));
}

#[tokio::test]
#[serial]
async fn test_complete_credits_workers_once_and_override_once() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let ctx = TestContext::new(pool).await;
    let event = ctx.upcoming_event(MockData::long_work_event(2, 200)).await;
    let present = create_test_user(&ctx.pool, UserRole::Captain, 1200).await;
    let absent = create_test_user(&ctx.pool, UserRole::Captain, 1200).await;
    let present_booking = ctx.bookings.book(present.id, event.id).await.unwrap();
    let absent_booking = ctx.bookings.book(absent.id, event.id).await.unwrap();
    ctx.events.start(ctx.admin(), event.id).await.unwrap();

    ctx.attendance
        .update_attendance(
            ctx.admin(),
            present_booking.id,
            attendance(BookingStatus::Present, 50, 0, 30),
        )
        .await
        .unwrap();
    ctx.attendance
        .update_attendance(
            ctx.admin(),
            absent_booking.id,
            attendance(BookingStatus::Absent, 0, 0, 0),
        )
        .await
        .unwrap();

    let summary = ctx
        .attendance
        .event_wage_summary(ctx.admin(), event.id)
        .await
        .unwrap();
    assert_eq!(summary.total_workers, 1);
    assert_eq!(summary.grand_total, 1420);

    let too_early = ctx
        .overrides
        .override_wage(ctx.admin_id, present_booking.id, WageAdjustment::default())
        .await;
    assert!(matches!(too_early, Err(AppError::EventNotCompleted)));

    let report = ctx.events.complete(ctx.admin(), event.id).await.unwrap();
    assert_eq!(report.event.status, EventStatus::Completed);
    assert_eq!(report.bookings_completed, 1);
    assert_eq!(report.workers_credited, 1);

    let credited = user_repo::find_user(&ctx.pool, present.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credited.completed_work, 1);
    let skipped = user_repo::find_user(&ctx.pool, absent.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(skipped.completed_work, 0);

    let again = ctx.events.complete(ctx.admin(), event.id).await;
    assert!(matches!(again, Err(AppError::InvalidTransition { .. })));

    let bonus = WageAdjustment {
        ta_amount: 0,
        bonus_amount: 100,
        fine_amount: 0,
    };
    let overridden = ctx
        .overrides
        .override_wage(ctx.admin_id, present_booking.id, bonus)
        .await
        .unwrap();
    assert_eq!(overridden.status, BookingStatus::Completed);
    assert_eq!(overridden.ta_amount, 0);
    assert_eq!(overridden.total_amount, 1200 + 200 + 100);
    assert_eq!(overridden.overridden_by, Some(ctx.admin_id));

    let twice = ctx
        .overrides
        .override_wage(ctx.admin_id, present_booking.id, bonus)
        .await;
    assert!(matches!(twice, Err(AppError::AlreadyOverridden)));

    let on_absent = ctx
        .overrides
        .override_wage(ctx.admin_id, absent_booking.id, bonus)
        .await;
    assert!(matches!(on_absent, Err(AppError::BookingAbsent)));
}

#[tokio::test]
#[serial]
async fn test_event_bookings_filter_by_status_and_name() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let ctx = TestContext::new(pool).await;
    let event = ctx.upcoming_event(MockData::event(1, 2)).await;
    let captain = create_test_user(&ctx.pool, UserRole::Captain, 1200).await;
    let first = create_test_user(&ctx.pool, UserRole::JuniorBoy, 500).await;
    let second = create_test_user(&ctx.pool, UserRole::JuniorBoy, 500).await;
    for user in [&captain, &first, &second] {
        ctx.bookings.book(user.id, event.id).await.unwrap();
    }

    let all = ctx
        .bookings
        .list_for_event(ctx.admin(), event.id, &EventBookingFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].role, RolePool::Captain);

    let by_name = ctx
        .bookings
        .list_for_event(
            ctx.admin(),
            event.id,
            &EventBookingFilter {
                status: None,
                name: Some(first.name.to_uppercase()),
            },
        )
        .await
        .unwrap();
    assert!(by_name.iter().any(|row| row.user_id == first.id));

    let present = ctx
        .bookings
        .list_for_event(
            ctx.admin(),
            event.id,
            &EventBookingFilter {
                status: Some(BookingStatus::Present),
                name: None,
            },
        )
        .await
        .unwrap();
    assert!(present.is_empty());
}
