//! Pre-commit audit stamping.

use std::sync::Arc;

use mockable::Clock;

use crate::model::Audited;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Insert,
    Update,
}

/// Fills the audit envelope right before a row is written.
///
/// Creation fields are written on insert only; modification fields on every
/// write.
#[derive(Clone)]
pub struct AuditStamper {
    clock: Arc<dyn Clock>,
}

impl AuditStamper {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn stamp<E: Audited>(&self, entity: &mut E, kind: WriteKind, actor: &str) {
        let now = self.clock.utc();
        let audit = entity.audit_mut();
        if kind == WriteKind::Insert {
            audit.date_created = now;
            audit.created_by = actor.to_string();
        }
        audit.last_modified_date = now;
        audit.last_modified_by = actor.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::LeaveType;
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn insert_sets_creation_and_modification() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let stamper = AuditStamper::new(Arc::new(FixedClock::new(at)));
        let mut leave_type = LeaveType::default();

        stamper.stamp(&mut leave_type, WriteKind::Insert, "hr.jane");

        assert_eq!(leave_type.audit.date_created, at);
        assert_eq!(leave_type.audit.created_by, "hr.jane");
        assert_eq!(leave_type.audit.last_modified_date, at);
        assert_eq!(leave_type.audit.last_modified_by, "hr.jane");
    }

    #[test]
    fn update_only_refreshes_modification() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(at));
        let stamper = AuditStamper::new(clock.clone());
        let mut leave_type = LeaveType::default();
        stamper.stamp(&mut leave_type, WriteKind::Insert, "hr.jane");

        clock.advance(TimeDelta::hours(2));
        stamper.stamp(&mut leave_type, WriteKind::Update, "admin.kim");

        assert_eq!(leave_type.audit.date_created, at);
        assert_eq!(leave_type.audit.created_by, "hr.jane");
        assert_eq!(leave_type.audit.last_modified_date, at + TimeDelta::hours(2));
        assert_eq!(leave_type.audit.last_modified_by, "admin.kim");
    }
}
