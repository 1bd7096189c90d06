use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::LeaveTypeDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveAllocationDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 5)]
    pub number_of_days: i32,
    #[schema(example = 1)]
    pub leave_type_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveTypeDto>,
    #[schema(example = 2026)]
    pub period: i32,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateLeaveAllocationDto {
    #[schema(example = 5)]
    pub number_of_days: i32,
    #[schema(example = 1)]
    pub leave_type_id: i32,
    #[schema(example = 2026)]
    pub period: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateLeaveAllocationDto {
    /// Ignored in request bodies; the path identifier wins.
    #[serde(default)]
    pub id: i32,
    #[schema(example = 5)]
    pub number_of_days: i32,
    #[schema(example = 1)]
    pub leave_type_id: i32,
    #[schema(example = 2026)]
    pub period: i32,
}
