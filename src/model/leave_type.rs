use serde::{Deserialize, Serialize};

use super::Audit;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveType {
    pub id: i32,
    pub name: String,
    pub default_days: i32,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}
