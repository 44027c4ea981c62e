use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health report returned by `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Overall service status (always "healthy")
    #[schema(example = "healthy")]
    pub status: String,

    /// Database status. Static literal, no connectivity check is performed.
    #[schema(example = "connected")]
    pub database: String,

    /// Time of the check (ISO-8601, UTC, millisecond precision)
    #[schema(example = "2024-05-01T12:00:00.000Z")]
    pub timestamp: String,

    /// Name of the reporting service
    #[schema(example = "microservice-inventory")]
    pub service: String,
}

/// Body of every client error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body
    pub status_code: u16,

    /// Human readable reasons, one per rejected field
    pub message: Vec<String>,

    /// Status reason phrase (e.g., "Bad Request")
    pub error: String,
}
