use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveTypeDto {
    /// Ignored in request bodies; the path identifier wins.
    #[serde(default)]
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Vacation")]
    pub name: String,
    #[schema(example = 10)]
    pub default_days: i32,
    /// Read-only; ignored in request bodies.
    #[serde(default)]
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateLeaveTypeDto {
    #[schema(example = "Vacation")]
    pub name: String,
    #[schema(example = 10)]
    pub default_days: i32,
}
