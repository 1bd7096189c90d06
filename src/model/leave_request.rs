use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Audit, LeaveType};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveRequest {
    pub id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub leave_type_id: i32,
    /// Only populated by the "with details" reads.
    #[sqlx(skip)]
    pub leave_type: Option<LeaveType>,
    pub date_requested: DateTime<Utc>,
    pub request_comments: Option<String>,
    /// Set whenever the approval status is changed.
    pub date_actioned: Option<DateTime<Utc>>,
    /// `None` while pending, `Some(true)` approved, `Some(false)` rejected.
    pub approved: Option<bool>,
    pub cancelled: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

/// Status derived from the approval and cancellation columns.
///
/// Cancellation is orthogonal to approval, so a cancelled request reports
/// `Cancelled` whatever its approval value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LeaveRequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveRequest {
    pub fn status(&self) -> LeaveRequestStatus {
        if self.cancelled {
            return LeaveRequestStatus::Cancelled;
        }
        match self.approved {
            None => LeaveRequestStatus::Pending,
            Some(true) => LeaveRequestStatus::Approved,
            Some(false) => LeaveRequestStatus::Rejected,
        }
    }

    /// Overwrite the approval status and stamp the action time.
    ///
    /// No state is terminal: an approved request can be rejected again.
    pub fn change_approval(&mut self, approved: Option<bool>, at: DateTime<Utc>) {
        self.approved = approved;
        self.date_actioned = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(None, false, LeaveRequestStatus::Pending)]
    #[case(Some(true), false, LeaveRequestStatus::Approved)]
    #[case(Some(false), false, LeaveRequestStatus::Rejected)]
    #[case(Some(true), true, LeaveRequestStatus::Cancelled)]
    #[case(None, true, LeaveRequestStatus::Cancelled)]
    fn status_follows_approval_and_cancellation(
        #[case] approved: Option<bool>,
        #[case] cancelled: bool,
        #[case] expected: LeaveRequestStatus,
    ) {
        let request = LeaveRequest {
            approved,
            cancelled,
            ..LeaveRequest::default()
        };
        assert_eq!(request.status(), expected);
    }

    #[test]
    fn change_approval_can_revert_a_decision() {
        let first = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut request = LeaveRequest::default();

        request.change_approval(Some(true), first);
        assert_eq!(request.status(), LeaveRequestStatus::Approved);
        assert_eq!(request.date_actioned, Some(first));

        request.change_approval(Some(false), second);
        assert_eq!(request.status(), LeaveRequestStatus::Rejected);
        assert_eq!(request.date_actioned, Some(second));
    }

    #[test]
    fn status_renders_lowercase() {
        assert_eq!(LeaveRequestStatus::Pending.to_string(), "pending");
        assert_eq!(
            "rejected".parse::<LeaveRequestStatus>().unwrap(),
            LeaveRequestStatus::Rejected
        );
    }
}
