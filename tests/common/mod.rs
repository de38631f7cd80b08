#![allow(dead_code)]

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use fake::Fake;
use fake::faker::name::en::Name;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use uuid::Uuid;

use eventcrew::config::Config;
use eventcrew::database::models::*;
use eventcrew::database::repositories::user as user_repo;
use eventcrew::services::{
    AttendanceService, BookingService, EventService, RoleWageService, WageOverrideService,
};

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Connects to the test database and runs migrations, or returns `None` when no
/// database is configured so the calling test can skip.
pub async fn test_pool() -> Option<PgPool> {
    setup_test_env();

    let Ok(url) = env::var("TEST_DATABASE_URL").or_else(|_| env::var("DATABASE_URL")) else {
        eprintln!("skipping: TEST_DATABASE_URL / DATABASE_URL not set");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// All services wired against one pool, like the running app.
pub struct TestContext {
    pub pool: PgPool,
    pub admin_id: Uuid,
    pub events: EventService,
    pub bookings: BookingService,
    pub attendance: AttendanceService,
    pub overrides: WageOverrideService,
    pub role_wages: RoleWageService,
}

impl TestContext {
    pub async fn new(pool: PgPool) -> Self {
        Self::with_config(pool, Config::test_config()).await
    }

    pub async fn with_config(pool: PgPool, config: Config) -> Self {
        let admin = create_test_user(&pool, UserRole::Admin, 0).await;
        Self {
            admin_id: admin.id,
            events: EventService::new(pool.clone(), config.same_day_exclusive_booking),
            bookings: BookingService::new(pool.clone(), config.same_day_exclusive_booking),
            attendance: AttendanceService::new(pool.clone()),
            overrides: WageOverrideService::new(pool.clone()),
            role_wages: RoleWageService::new(pool.clone()),
            pool,
        }
    }

    pub fn admin(&self) -> Actor {
        Actor::Admin(self.admin_id)
    }

    pub async fn upcoming_event(&self, input: CreateEventInput) -> Event {
        self.events
            .create(input)
            .await
            .expect("Failed to create event")
    }

    pub async fn ongoing_event(&self, input: CreateEventInput) -> Event {
        let event = self.upcoming_event(input).await;
        self.events
            .start(self.admin(), event.id)
            .await
            .expect("Failed to start event")
    }
}

// Mock data generators
pub struct MockData;

impl MockData {
    /// A date far enough ahead that tests do not collide on the same day.
    pub fn future_date() -> NaiveDate {
        let offset = (30u64..3000).fake::<u64>();
        Utc::now()
            .date_naive()
            .checked_add_days(Days::new(offset))
            .expect("date in range")
    }

    pub fn event(captains: i32, juniors: i32) -> CreateEventInput {
        CreateEventInput {
            name: format!("{} wedding", Name().fake::<String>()),
            event_date: Self::future_date(),
            time_slot: TimeSlot::Night,
            reporting_time: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
            work_type: "catering".to_string(),
            location_link: None,
            required_captains: captains,
            required_sub_captains: 0,
            required_main_boys: 0,
            required_juniors: juniors,
            long_work: false,
            extra_wage_amount: 0,
            transport_provided: false,
            transport_type: None,
        }
    }

    pub fn long_work_event(captains: i32, extra: i64) -> CreateEventInput {
        CreateEventInput {
            long_work: true,
            extra_wage_amount: extra,
            ..Self::event(captains, 0)
        }
    }

    pub fn user(role: UserRole, current_wage: i64) -> CreateUserInput {
        CreateUserInput {
            name: Name().fake(),
            phone: format!("+91{}", &Uuid::new_v4().simple().to_string()[..12]),
            role,
            current_wage,
        }
    }
}

pub async fn create_test_user(pool: &PgPool, role: UserRole, current_wage: i64) -> User {
    user_repo::create_user(pool, &MockData::user(role, current_wage))
        .await
        .expect("Failed to create test user")
}

pub fn captain_actor(user: &User) -> Actor {
    Actor::Worker {
        user_id: user.id,
        role: user.role,
    }
}
