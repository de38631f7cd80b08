use eventcrew::config::Config;
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;

mod common;

const KEYS: [&str; 8] = [
    "DATABASE_URL",
    "DATABASE_MAX_CONNECTIONS",
    "JWT_SECRET",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "CORS_ORIGIN",
    "SAME_DAY_EXCLUSIVE_BOOKING",
];

fn save_env() -> Vec<(&'static str, Option<String>)> {
    KEYS.iter().map(|key| (*key, env::var(key).ok())).collect()
}

fn restore_env(saved: Vec<(&'static str, Option<String>)>) {
    for (key, value) in saved {
        match value {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }
    }
}

#[test]
#[serial]
fn test_config_from_env_with_defaults() {
    common::setup_test_env();
    let saved = save_env();
    for key in KEYS {
        unsafe { env::remove_var(key) };
    }

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.database_url, "postgres://@localhost:5432/eventcrew");
    assert_eq!(config.database_max_connections, 10);
    assert_eq!(
        config.jwt_secret,
        "your-super-secret-jwt-key-change-this-in-production-12345"
    );
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.environment, "development");
    assert_eq!(config.cors_origin, "http://localhost:3000");
    assert!(!config.same_day_exclusive_booking);
    assert!(config.is_development());

    restore_env(saved);
}

#[test]
#[serial]
fn test_config_from_env_with_custom_values() {
    common::setup_test_env();
    let saved = save_env();
    unsafe {
        env::set_var("DATABASE_URL", "postgres://crew@db:5432/crew");
        env::set_var("DATABASE_MAX_CONNECTIONS", "25");
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("HOST", "0.0.0.0");
        env::set_var("PORT", "3000");
        env::set_var("ENVIRONMENT", "production");
        env::set_var("CORS_ORIGIN", "https://crew.example.com");
        env::set_var("SAME_DAY_EXCLUSIVE_BOOKING", "true");
    }

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.database_url, "postgres://crew@db:5432/crew");
    assert_eq!(config.database_max_connections, 25);
    assert_eq!(config.jwt_secret, "test-secret");
    assert_eq!(config.server_address(), "0.0.0.0:3000");
    assert!(config.is_production());
    assert_eq!(config.cors_origin, "https://crew.example.com");
    assert!(config.same_day_exclusive_booking);

    restore_env(saved);
}

#[test]
#[serial]
fn test_config_with_invalid_numbers_falls_back() {
    common::setup_test_env();
    let saved = save_env();
    unsafe {
        env::set_var("PORT", "not-a-port");
        env::set_var("DATABASE_MAX_CONNECTIONS", "-3");
        env::set_var("SAME_DAY_EXCLUSIVE_BOOKING", "sometimes");
    }

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.database_max_connections, 10);
    assert!(!config.same_day_exclusive_booking);

    restore_env(saved);
}
