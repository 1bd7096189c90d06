use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::LeaveTypeDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequestDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "2026-11-02T00:00:00Z", format = "date-time", value_type = String)]
    pub start_date: DateTime<Utc>,
    #[schema(example = "2026-11-06T00:00:00Z", format = "date-time", value_type = String)]
    pub end_date: DateTime<Utc>,
    #[schema(example = 1)]
    pub leave_type_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveTypeDto>,
    #[schema(example = "2026-10-17T08:30:00Z", format = "date-time", value_type = String)]
    pub date_requested: DateTime<Utc>,
    #[schema(example = "Family trip", nullable = true)]
    pub request_comments: Option<String>,
    #[schema(format = "date-time", value_type = Option<String>, nullable = true)]
    pub date_actioned: Option<DateTime<Utc>>,
    #[schema(nullable = true)]
    pub approved: Option<bool>,
    pub cancelled: bool,
    /// One of `pending`, `approved`, `rejected`, `cancelled`.
    #[schema(example = "pending")]
    pub status: String,
    #[schema(example = "2026-10-17T08:30:00Z", format = "date-time", value_type = String)]
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateLeaveRequestDto {
    #[schema(example = "2026-11-02T00:00:00Z", format = "date-time", value_type = String)]
    pub start_date: DateTime<Utc>,
    #[schema(example = "2026-11-06T00:00:00Z", format = "date-time", value_type = String)]
    pub end_date: DateTime<Utc>,
    #[schema(example = 1)]
    pub leave_type_id: i32,
    #[serde(default)]
    #[schema(example = "Family trip", nullable = true)]
    pub request_comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateLeaveRequestDto {
    /// Ignored in request bodies; the path identifier wins.
    #[serde(default)]
    pub id: i32,
    #[schema(example = "2026-11-02T00:00:00Z", format = "date-time", value_type = String)]
    pub start_date: DateTime<Utc>,
    #[schema(example = "2026-11-06T00:00:00Z", format = "date-time", value_type = String)]
    pub end_date: DateTime<Utc>,
    #[schema(example = 1)]
    pub leave_type_id: i32,
    #[serde(default)]
    #[schema(nullable = true)]
    pub request_comments: Option<String>,
    /// Left untouched when absent.
    #[serde(default)]
    #[schema(nullable = true)]
    pub cancelled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChangeLeaveRequestApprovalDto {
    /// `true` approves, `false` rejects, `null` resets to pending.
    #[schema(example = true, nullable = true)]
    pub approved: Option<bool>,
}
