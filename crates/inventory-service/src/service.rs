//! Greeting and health providers backing the HTTP handlers.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::HealthStatus;

pub const GREETING: &str = "Hello World!";
pub const SERVICE_NAME: &str = "microservice-inventory";

const STATUS_HEALTHY: &str = "healthy";
const DATABASE_CONNECTED: &str = "connected";

/// Return the service greeting
pub fn greeting() -> &'static str {
    GREETING
}

/// Build a health report stamped with the current time
pub fn health_status() -> HealthStatus {
    health_status_at(Utc::now())
}

/// Build a health report stamped with `now`
pub fn health_status_at(now: DateTime<Utc>) -> HealthStatus {
    HealthStatus {
        status: STATUS_HEALTHY.to_string(),
        // Not backed by a real connectivity check.
        database: DATABASE_CONNECTED.to_string(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME.to_string(),
    }
}
