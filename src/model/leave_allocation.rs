use serde::{Deserialize, Serialize};

use super::{Audit, LeaveType};

/// A grant of leave days of one type for one period (calendar year).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveAllocation {
    pub id: i32,
    pub number_of_days: i32,
    pub leave_type_id: i32,
    /// Only populated by the "with details" reads.
    #[sqlx(skip)]
    pub leave_type: Option<LeaveType>,
    pub period: i32,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}
