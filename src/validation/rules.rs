use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use mockable::Clock;

use super::{LeaveTypeExists, RuleSet};
use crate::dto::{
    CreateLeaveAllocationDto, CreateLeaveRequestDto, CreateLeaveTypeDto, LeaveTypeDto,
    UpdateLeaveAllocationDto, UpdateLeaveRequestDto,
};
use crate::repository::LeaveTypeRepository;

pub trait LeaveTypeFields {
    fn name(&self) -> &str;
    fn default_days(&self) -> i32;
}

pub trait LeaveAllocationFields {
    fn number_of_days(&self) -> i32;
    fn leave_type_id(&self) -> i32;
    fn period(&self) -> i32;
}

pub trait LeaveRequestFields {
    fn start_date(&self) -> DateTime<Utc>;
    fn end_date(&self) -> DateTime<Utc>;
    fn leave_type_id(&self) -> i32;
}

macro_rules! leave_type_fields {
    ($($dto:ty),+) => {$(
        impl LeaveTypeFields for $dto {
            fn name(&self) -> &str { &self.name }
            fn default_days(&self) -> i32 { self.default_days }
        }
    )+};
}

macro_rules! leave_allocation_fields {
    ($($dto:ty),+) => {$(
        impl LeaveAllocationFields for $dto {
            fn number_of_days(&self) -> i32 { self.number_of_days }
            fn leave_type_id(&self) -> i32 { self.leave_type_id }
            fn period(&self) -> i32 { self.period }
        }
    )+};
}

macro_rules! leave_request_fields {
    ($($dto:ty),+) => {$(
        impl LeaveRequestFields for $dto {
            fn start_date(&self) -> DateTime<Utc> { self.start_date }
            fn end_date(&self) -> DateTime<Utc> { self.end_date }
            fn leave_type_id(&self) -> i32 { self.leave_type_id }
        }
    )+};
}

leave_type_fields!(CreateLeaveTypeDto, LeaveTypeDto);
leave_allocation_fields!(CreateLeaveAllocationDto, UpdateLeaveAllocationDto);
leave_request_fields!(CreateLeaveRequestDto, UpdateLeaveRequestDto);

pub fn leave_type_rules<T>() -> RuleSet<T>
where
    T: LeaveTypeFields + Sync + 'static,
{
    RuleSet::new()
        .field("name", "name is required.", |t: &T| !t.name().trim().is_empty())
        .field("default_days", "default_days must not be negative.", |t: &T| {
            t.default_days() >= 0
        })
}

/// Shared by allocation create and update. The period floor is the clock's
/// current year at evaluation time.
pub fn leave_allocation_rules<T>(
    leave_types: Arc<dyn LeaveTypeRepository>,
    clock: Arc<dyn Clock>,
) -> RuleSet<T>
where
    T: LeaveAllocationFields + Sync + 'static,
{
    RuleSet::new()
        .field(
            "number_of_days",
            "number_of_days must be greater than 0.",
            |a: &T| a.number_of_days() > 0,
        )
        .field(
            "leave_type_id",
            "leave_type_id must not be negative.",
            |a: &T| a.leave_type_id() >= 0,
        )
        .rule(LeaveTypeExists::new("leave_type_id", leave_types, |a: &T| {
            a.leave_type_id()
        }))
        .field(
            "period",
            "period must not be before the current year.",
            move |a: &T| a.period() >= clock.utc().year(),
        )
}

/// Rules common to leave-request create and update.
pub fn leave_request_rules<T>(leave_types: Arc<dyn LeaveTypeRepository>) -> RuleSet<T>
where
    T: LeaveRequestFields + Sync + 'static,
{
    RuleSet::new()
        .field("start_date", "start_date must be before end_date.", |r: &T| {
            r.start_date() < r.end_date()
        })
        .field("end_date", "end_date must be after start_date.", |r: &T| {
            r.end_date() > r.start_date()
        })
        .rule(LeaveTypeExists::new("leave_type_id", leave_types, |r: &T| {
            r.leave_type_id()
        }))
}

pub fn create_leave_request_rules(
    leave_types: Arc<dyn LeaveTypeRepository>,
    clock: Arc<dyn Clock>,
) -> RuleSet<CreateLeaveRequestDto> {
    RuleSet::new().include(leave_request_rules(leave_types)).field(
        "start_date",
        "start_date must not be in the past.",
        move |r: &CreateLeaveRequestDto| r.start_date >= clock.utc(),
    )
}

/// Updates may move a request that has already started, so the past-date
/// check is not part of this set.
pub fn update_leave_request_rules(
    leave_types: Arc<dyn LeaveTypeRepository>,
) -> RuleSet<UpdateLeaveRequestDto> {
    RuleSet::new().include(leave_request_rules(leave_types)).field(
        "id",
        "id must be greater than 0.",
        |r: &UpdateLeaveRequestDto| r.id > 0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::repository::{MockLeaveTypeRepository, RepositoryError};
    use chrono::{TimeDelta, TimeZone};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(now()))
    }

    fn leave_types(exists: bool) -> Arc<dyn LeaveTypeRepository> {
        let mut repo = MockLeaveTypeRepository::new();
        repo.expect_exists().returning(move |_| Ok(exists));
        Arc::new(repo)
    }

    fn request(start_offset_days: i64, length_days: i64) -> CreateLeaveRequestDto {
        let start = now() + TimeDelta::days(start_offset_days);
        CreateLeaveRequestDto {
            start_date: start,
            end_date: start + TimeDelta::days(length_days),
            leave_type_id: 1,
            request_comments: None,
        }
    }

    #[tokio::test]
    async fn valid_leave_type_passes() {
        let dto = CreateLeaveTypeDto {
            name: "Vacation".to_string(),
            default_days: 10,
        };
        assert!(leave_type_rules().validate(&dto).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_and_negative_days_are_both_reported() {
        let dto = LeaveTypeDto {
            id: 3,
            name: "   ".to_string(),
            default_days: -1,
            date_created: Default::default(),
        };
        let violations = leave_type_rules().validate(&dto).await.unwrap();
        assert!(violations.has_field("name"));
        assert!(violations.has_field("default_days"));
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    #[tokio::test]
    async fn allocation_days_must_be_positive(#[case] days: i32) {
        let dto = CreateLeaveAllocationDto {
            number_of_days: days,
            leave_type_id: 1,
            period: 2026,
        };
        let violations = leave_allocation_rules(leave_types(true), clock())
            .validate(&dto)
            .await
            .unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations.has_field("number_of_days"));
    }

    #[tokio::test]
    async fn allocation_for_past_period_and_unknown_type_collects_both() {
        let dto = CreateLeaveAllocationDto {
            number_of_days: 5,
            leave_type_id: 99,
            period: 2025,
        };
        let violations = leave_allocation_rules(leave_types(false), clock())
            .validate(&dto)
            .await
            .unwrap();
        assert_eq!(violations.len(), 2);
        assert!(violations.has_field("period"));
        assert!(
            violations
                .messages()
                .contains(&"leave_type_id does not exist.".to_string())
        );
    }

    #[tokio::test]
    async fn existence_lookup_uses_the_referenced_id() {
        let mut repo = MockLeaveTypeRepository::new();
        repo.expect_exists()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(true));
        let dto = UpdateLeaveAllocationDto {
            id: 1,
            number_of_days: 5,
            leave_type_id: 42,
            period: 2027,
        };
        let violations = leave_allocation_rules(Arc::new(repo), clock())
            .validate(&dto)
            .await
            .unwrap();
        assert!(violations.is_empty());
    }

    #[rstest]
    #[case::same_instant(3, 0)]
    #[case::reversed(3, -2)]
    #[tokio::test]
    async fn request_dates_out_of_order_flag_both_fields(
        #[case] offset: i64,
        #[case] length: i64,
    ) {
        let violations = create_leave_request_rules(leave_types(true), clock())
            .validate(&request(offset, length))
            .await
            .unwrap();
        assert!(violations.has_field("start_date"));
        assert!(violations.has_field("end_date"));
    }

    #[tokio::test]
    async fn request_starting_in_the_past_is_rejected_on_create() {
        let violations = create_leave_request_rules(leave_types(true), clock())
            .validate(&request(-1, 3))
            .await
            .unwrap();
        assert_eq!(
            violations.messages(),
            vec!["start_date must not be in the past."]
        );
    }

    #[tokio::test]
    async fn request_for_unknown_leave_type_is_rejected() {
        let violations = create_leave_request_rules(leave_types(false), clock())
            .validate(&request(2, 3))
            .await
            .unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations.has_field("leave_type_id"));
    }

    #[tokio::test]
    async fn update_allows_past_start_but_needs_an_id() {
        let base = request(-10, 3);
        let dto = UpdateLeaveRequestDto {
            id: 0,
            start_date: base.start_date,
            end_date: base.end_date,
            leave_type_id: 1,
            request_comments: None,
            cancelled: None,
        };
        let violations = update_leave_request_rules(leave_types(true))
            .validate(&dto)
            .await
            .unwrap();
        assert_eq!(violations.messages(), vec!["id must be greater than 0."]);
    }

    #[tokio::test]
    async fn storage_failure_during_lookup_propagates() {
        let mut repo = MockLeaveTypeRepository::new();
        repo.expect_exists()
            .returning(|_| Err(RepositoryError::Connection("refused".to_string())));
        let result = create_leave_request_rules(Arc::new(repo), clock())
            .validate(&request(2, 3))
            .await;
        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }
}
