use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping columns every table carries.
///
/// Only the storage layer writes these; see [`crate::store::audit`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Audit {
    pub date_created: DateTime<Utc>,
    pub created_by: String,
    pub last_modified_date: DateTime<Utc>,
    pub last_modified_by: String,
}

/// Entities that carry an [`Audit`] envelope and a numeric key.
pub trait Audited {
    fn id(&self) -> i32;
    fn audit(&self) -> &Audit;
    fn audit_mut(&mut self) -> &mut Audit;
}

macro_rules! impl_audited {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl $crate::model::Audited for $entity {
                fn id(&self) -> i32 {
                    self.id
                }

                fn audit(&self) -> &$crate::model::Audit {
                    &self.audit
                }

                fn audit_mut(&mut self) -> &mut $crate::model::Audit {
                    &mut self.audit
                }
            }
        )+
    };
}

impl_audited!(
    super::LeaveType,
    super::LeaveAllocation,
    super::LeaveRequest,
);
